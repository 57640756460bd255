#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Field;

const MPH_PER_KNOT: f64 = 1.15077945;
const MPS_PER_KNOT: f64 = 0.51444444;
const KMPH_PER_KNOT: f64 = 1.852;
const MILES_PER_METER: f64 = 0.00062137112;
const KM_PER_METER: f64 = 0.001;
const FEET_PER_METER: f64 = 3.2808399;

macro_rules! hundredths {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(pub i32);

        impl $name {
            fn scaled(self) -> f64 {
                f64::from(self.0) / 100.0
            }
        }
    };
}

hundredths! {
    /// Speed over ground in hundredths of a knot.
    Speed
}

hundredths! {
    /// Course over ground in hundredths of a degree.
    Course
}

hundredths! {
    /// Altitude above mean sea level in centimeters.
    Altitude
}

hundredths! {
    /// Horizontal dilution of precision in hundredths.
    Hdop
}

impl Speed {
    pub fn knots(self) -> f64 {
        self.scaled()
    }

    pub fn mph(self) -> f64 {
        MPH_PER_KNOT * self.scaled()
    }

    pub fn mps(self) -> f64 {
        MPS_PER_KNOT * self.scaled()
    }

    pub fn kmph(self) -> f64 {
        KMPH_PER_KNOT * self.scaled()
    }
}

impl Course {
    /// Degrees from true north.
    pub fn deg(self) -> f64 {
        self.scaled()
    }
}

impl Altitude {
    pub fn meters(self) -> f64 {
        self.scaled()
    }

    pub fn miles(self) -> f64 {
        MILES_PER_METER * self.scaled()
    }

    pub fn kilometers(self) -> f64 {
        KM_PER_METER * self.scaled()
    }

    pub fn feet(self) -> f64 {
        FEET_PER_METER * self.scaled()
    }
}

impl Hdop {
    pub fn hdop(self) -> f64 {
        self.scaled()
    }
}

impl Field<Speed> {
    pub fn knots(&mut self) -> f64 {
        self.value().knots()
    }

    pub fn mph(&mut self) -> f64 {
        self.value().mph()
    }

    pub fn mps(&mut self) -> f64 {
        self.value().mps()
    }

    pub fn kmph(&mut self) -> f64 {
        self.value().kmph()
    }
}

impl Field<Course> {
    pub fn deg(&mut self) -> f64 {
        self.value().deg()
    }
}

impl Field<Altitude> {
    pub fn meters(&mut self) -> f64 {
        self.value().meters()
    }

    pub fn miles(&mut self) -> f64 {
        self.value().miles()
    }

    pub fn kilometers(&mut self) -> f64 {
        self.value().kilometers()
    }

    pub fn feet(&mut self) -> f64 {
        self.value().feet()
    }
}

impl Field<Hdop> {
    pub fn hdop(&mut self) -> f64 {
        self.value().hdop()
    }
}
