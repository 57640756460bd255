//! # NMEA 0183 Stream Decoder
//!
//! This library decodes NMEA 0183 sentences from a byte stream, one byte at a
//! time, and keeps the latest valid navigational fix: position, date, time,
//! speed, course, altitude, satellite count and horizontal dilution of
//! precision. Raw terms of any other sentence can be captured through custom
//! fields.
//!
//! The decoder never allocates and uses a fixed amount of memory no matter how
//! long the stream runs, which makes it suitable for interrupt handlers and
//! `no_std` targets:
//! - numbers are decoded into fixed-point integers without floating point,
//! - values are staged while a sentence streams in and only committed once its
//!   checksum has been verified,
//! - terms longer than [`MAX_TERM_LEN`] are truncated, never buffered.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_stream::{ManualClock, StreamParser};
//!
//! let mut gps = StreamParser::new(ManualClock::new(0));
//!
//! for &byte in b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n" {
//!     if gps.encode(byte) {
//!         // a complete, checksum-valid sentence was just committed
//!     }
//! }
//!
//! assert!(gps.location.is_updated());
//! assert!((gps.location.lat() - 48.1173).abs() < 1e-6);
//! assert_eq!(gps.satellites.value(), 8);
//! assert_eq!(gps.altitude.meters(), 545.4);
//! ```
//!
//! ## Feature flags
//!
//! - `std` (default): [`StdClock`] backed by `std::time::Instant`
//! - `serde`: `Serialize`/`Deserialize` for the value types
//! - `time`: conversions into `time::Date`, `time::Time` and `time::PrimitiveDateTime`
//! - `defmt`: trace logging and `defmt::Format` implementations

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod clock;
mod custom;
pub mod decode;
pub mod error;
mod field;
pub mod parsing;
mod sentence;
mod stream;
mod values;

pub use clock::*;
pub use custom::*;
pub use decode::{
    NumericMode, RawDegrees, decode_checksum, decode_degrees, decode_fixed_point, decode_unsigned,
};
pub use error::{Error, IResult, RegistryError};
pub use field::*;
pub use sentence::{CONSTELLATIONS, SentenceKind};
pub use stream::*;
pub use values::*;

/// Characters of a term that are kept; the rest of the term is dropped.
pub const MAX_TERM_LEN: usize = 14;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;

#[cfg(test)]
mod tests {
    mod age;
    mod custom;
    mod gga;
    mod rmc;
    mod strict;
    pub(crate) mod support;
}
