//! # Sentence Dispatch
//!
//! Classifies the sentence identifier and maps `(sentence, term index)` pairs of
//! the decoded sentences to the value they carry.

use nom::{
    Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, one_of},
    combinator::value,
    sequence::preceded,
};

use crate::{IResult, parsing::consumed};

/// Constellation letters accepted after the leading `G` of the talker id:
/// GPS, multi-constellation, Galileo, BeiDou and GLONASS.
pub const CONSTELLATIONS: &str = "PNABL";

/// Sentence types the parser decodes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    /// RMC - Recommended Minimum Navigation Information
    ///
    /// ```text
    ///         1         2 3       4 5        6  7   8   9    10 1112
    ///         |         | |       | |        |  |   |   |    |  | |
    ///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
    /// ```
    Rmc,

    /// GGA - Global Positioning System Fix Data
    ///
    /// ```text
    ///                                                      11
    ///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
    ///         |         |       | |        | | |  |   |   | |   | |   |
    ///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
    /// ```
    Gga,

    /// Anything else; only custom fields are extracted from it.
    #[default]
    Other,
}

/// What a data term of a decoded sentence feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Time,
    Status,
    Latitude,
    NorthSouth,
    Longitude,
    EastWest,
    Speed,
    Course,
    Date,
    FixQuality,
    Satellites,
    Hdop,
    Altitude,
    FixMode,
}

fn identifier(i: &str) -> IResult<&str, SentenceKind> {
    consumed(preceded(
        (char('G'), one_of(CONSTELLATIONS)),
        alt((
            value(SentenceKind::Rmc, tag("RMC")),
            value(SentenceKind::Gga, tag("GGA")),
        )),
    ))
    .parse(i)
}

impl SentenceKind {
    /// Classifies the identifier term, e.g. `GPRMC` or `GNGGA`.
    ///
    /// ```rust
    /// use nmea0183_stream::SentenceKind;
    ///
    /// assert_eq!(SentenceKind::classify("GNRMC"), SentenceKind::Rmc);
    /// assert_eq!(SentenceKind::classify("GLGGA"), SentenceKind::Gga);
    /// assert_eq!(SentenceKind::classify("GPGSV"), SentenceKind::Other);
    /// assert_eq!(SentenceKind::classify("BDRMC"), SentenceKind::Other);
    /// ```
    pub fn classify(term: &str) -> Self {
        identifier(term).map_or(SentenceKind::Other, |(_, kind)| kind)
    }

    pub(crate) const fn route(self, term_index: u8) -> Option<Target> {
        match (self, term_index) {
            (SentenceKind::Rmc, 1) | (SentenceKind::Gga, 1) => Some(Target::Time),
            (SentenceKind::Rmc, 2) => Some(Target::Status),
            (SentenceKind::Rmc, 3) | (SentenceKind::Gga, 2) => Some(Target::Latitude),
            (SentenceKind::Rmc, 4) | (SentenceKind::Gga, 3) => Some(Target::NorthSouth),
            (SentenceKind::Rmc, 5) | (SentenceKind::Gga, 4) => Some(Target::Longitude),
            (SentenceKind::Rmc, 6) | (SentenceKind::Gga, 5) => Some(Target::EastWest),
            (SentenceKind::Rmc, 7) => Some(Target::Speed),
            (SentenceKind::Rmc, 8) => Some(Target::Course),
            (SentenceKind::Rmc, 9) => Some(Target::Date),
            (SentenceKind::Rmc, 12) => Some(Target::FixMode),
            (SentenceKind::Gga, 6) => Some(Target::FixQuality),
            (SentenceKind::Gga, 7) => Some(Target::Satellites),
            (SentenceKind::Gga, 8) => Some(Target::Hdop),
            (SentenceKind::Gga, 9) => Some(Target::Altitude),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        for talker in ["GP", "GN", "GA", "GB", "GL"] {
            let mut rmc = heapless::String::<8>::new();
            rmc.push_str(talker).unwrap();
            rmc.push_str("RMC").unwrap();
            assert_eq!(SentenceKind::classify(&rmc), SentenceKind::Rmc);
        }

        assert_eq!(SentenceKind::classify("GPGGA"), SentenceKind::Gga);
        assert_eq!(SentenceKind::classify("GPGGAX"), SentenceKind::Other);
        assert_eq!(SentenceKind::classify("GQRMC"), SentenceKind::Other);
        assert_eq!(SentenceKind::classify("gprmc"), SentenceKind::Other);
        assert_eq!(SentenceKind::classify(""), SentenceKind::Other);
    }

    #[test]
    fn test_routes() {
        assert_eq!(SentenceKind::Rmc.route(0), None);
        assert_eq!(SentenceKind::Rmc.route(9), Some(Target::Date));
        assert_eq!(SentenceKind::Rmc.route(10), None);
        assert_eq!(SentenceKind::Gga.route(6), Some(Target::FixQuality));
        assert_eq!(SentenceKind::Gga.route(10), None);
        assert_eq!(SentenceKind::Other.route(1), None);
    }
}
