#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Field, FixMode, FixQuality, RawDegrees};

/// Position as transmitted by RMC and GGA.
///
/// Latitude and longitude are staged term by term (value first, hemisphere
/// letter next) and committed together with the fix indicators.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Latitude, negative in the southern hemisphere
    pub lat: RawDegrees,
    /// Longitude, negative in the western hemisphere
    pub lng: RawDegrees,
    /// GGA fix quality, if one was received
    pub quality: Option<FixQuality>,
    /// RMC mode indicator, if one was received
    pub mode: Option<FixMode>,
}

impl Location {
    /// Latitude in signed decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat.to_degrees()
    }

    /// Longitude in signed decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng.to_degrees()
    }
}

impl Field<Location> {
    /// Latitude in signed decimal degrees.
    pub fn lat(&mut self) -> f64 {
        self.value().lat()
    }

    /// Longitude in signed decimal degrees.
    pub fn lng(&mut self) -> f64 {
        self.value().lng()
    }

    /// Latitude without conversion.
    pub fn raw_lat(&mut self) -> RawDegrees {
        self.value().lat
    }

    /// Longitude without conversion.
    pub fn raw_lng(&mut self) -> RawDegrees {
        self.value().lng
    }

    /// Fix quality of the most recent checksum-valid GGA that reported a fix.
    ///
    /// An RMC commit republishes it unchanged.
    pub fn fix_quality(&mut self) -> Option<FixQuality> {
        self.value().quality
    }

    /// Mode indicator of the most recent checksum-valid RMC that reported a fix.
    ///
    /// A GGA commit republishes it unchanged.
    pub fn fix_mode(&mut self) -> Option<FixMode> {
        self.value().mode
    }
}
