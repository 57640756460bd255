//! # Decoded Values
//!
//! Payload types stored in the parser's [`Field`](crate::Field) cells, together
//! with the unit conversions derived from their fixed-point representation.

mod datetime;
mod location;
mod measure;

pub use datetime::{Date, Time};
pub use location::Location;
pub use measure::{Altitude, Course, Hdop, Speed};

use nom::Parser;

use crate::IResult;

macro_rules! letter_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Parses the indicator letter at the start of the input.
            pub fn parse(i: &str) -> IResult<&str, Self> {
                nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)).parse(i)
            }

            /// Decodes the first letter of a term, ignoring anything after it.
            pub fn from_term(term: &str) -> Option<Self> {
                Self::parse(term).ok().map(|(_, v)| v)
            }

            /// The letter this indicator is transmitted as.
            pub fn letter(self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }
    };
}

letter_enum! {
    /// RMC status indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid (navigation receiver warning)
        'V' => Invalid,
    }
}

letter_enum! {
    /// GGA fix quality indicator
    pub enum FixQuality {
        /// 0 - Fix not available
        '0' => Invalid,
        /// 1 - GPS fix
        '1' => Gps,
        /// 2 - Differential GPS fix
        '2' => Dgps,
        /// 3 - PPS fix
        '3' => Pps,
        /// 4 - Real Time Kinematic
        '4' => Rtk,
        /// 5 - Float RTK
        '5' => FloatRtk,
        /// 6 - Estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => Manual,
        /// 8 - Simulation mode
        '8' => Simulated,
    }
}

letter_enum! {
    /// RMC mode indicator (NMEA 2.3 and later)
    pub enum FixMode {
        /// N - Data not valid
        'N' => NotValid,
        /// A - Autonomous mode
        'A' => Autonomous,
        /// D - Differential mode
        'D' => Differential,
        /// E - Estimated (dead reckoning) mode
        'E' => Estimated,
    }
}
