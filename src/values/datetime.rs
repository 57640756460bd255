#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Field;

/// UTC date packed as the decimal number `DDMMYY`.
///
/// ```rust
/// use nmea0183_stream::Date;
///
/// let date = Date(30913);
/// assert_eq!((date.day(), date.month(), date.year()), (3, 9, 2013));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub u32);

impl Date {
    /// Four digit year, assuming the 21st century.
    pub fn year(self) -> u16 {
        (self.0 % 100) as u16 + 2000
    }

    pub fn month(self) -> u8 {
        ((self.0 / 100) % 100) as u8
    }

    pub fn day(self) -> u8 {
        (self.0 / 10000) as u8
    }

    /// Calendar date, if the packed value names an existing day.
    #[cfg(feature = "time")]
    pub fn to_date(self) -> Option<time::Date> {
        let month = time::Month::try_from(self.month()).ok()?;
        time::Date::from_calendar_date(i32::from(self.year()), month, self.day()).ok()
    }
}

/// UTC time of day packed as the decimal number `HHMMSSCC`.
///
/// ```rust
/// use nmea0183_stream::Time;
///
/// let time = Time(4510300);
/// assert_eq!((time.hour(), time.minute(), time.second()), (4, 51, 3));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Time(pub u32);

impl Time {
    pub fn hour(self) -> u8 {
        (self.0 / 1_000_000) as u8
    }

    pub fn minute(self) -> u8 {
        ((self.0 / 10_000) % 100) as u8
    }

    pub fn second(self) -> u8 {
        ((self.0 / 100) % 100) as u8
    }

    pub fn centisecond(self) -> u8 {
        (self.0 % 100) as u8
    }

    /// Time of day, if the packed value is in range.
    #[cfg(feature = "time")]
    pub fn to_time(self) -> Option<time::Time> {
        time::Time::from_hms_milli(
            self.hour(),
            self.minute(),
            self.second(),
            u16::from(self.centisecond()) * 10,
        )
        .ok()
    }
}

impl Field<Date> {
    pub fn year(&mut self) -> u16 {
        self.value().year()
    }

    pub fn month(&mut self) -> u8 {
        self.value().month()
    }

    pub fn day(&mut self) -> u8 {
        self.value().day()
    }
}

impl Field<Time> {
    pub fn hour(&mut self) -> u8 {
        self.value().hour()
    }

    pub fn minute(&mut self) -> u8 {
        self.value().minute()
    }

    pub fn second(&mut self) -> u8 {
        self.value().second()
    }

    pub fn centisecond(&mut self) -> u8 {
        self.value().centisecond()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_fields() {
        let time = Time(23595999);
        assert_eq!(time.hour(), 23);
        assert_eq!(time.minute(), 59);
        assert_eq!(time.second(), 59);
        assert_eq!(time.centisecond(), 99);
    }

    #[test]
    fn test_date_fields() {
        let date = Date(311299);
        assert_eq!(date.day(), 31);
        assert_eq!(date.month(), 12);
        assert_eq!(date.year(), 2099);
    }

    #[cfg(feature = "time")]
    #[test]
    fn test_time_conversions() {
        assert_eq!(
            Date(30913).to_date(),
            time::Date::from_calendar_date(2013, time::Month::September, 3).ok()
        );
        assert_eq!(Date(310213).to_date(), None);
        assert_eq!(
            Time(4510350).to_time(),
            time::Time::from_hms_milli(4, 51, 3, 500).ok()
        );
        assert_eq!(Time(25000000).to_time(), None);
    }
}
