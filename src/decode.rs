//! # Fixed-Point Decoders
//!
//! Pure functions turning NMEA numeric and coordinate text into deterministic
//! fixed-point integers. No floating point is involved while decoding.
//!
//! Every decoder comes in two flavours:
//! - a nom parser (`fixed_point`, `degrees`, ...) usable on its own or in
//!   combination with other parsers,
//! - a lenient convenience function (`decode_fixed_point`, `decode_degrees`, ...)
//!   that accepts any text and decodes its numeric prefix, yielding zero when
//!   there is none.
//!
//! The `strict_*` parsers reject anything but a complete, well-formed number.

use nom::{
    Parser,
    bytes::complete::take,
    character::complete::{char, digit0, digit1, hex_digit1, one_of},
    combinator::opt,
    error::ParseError,
    number::complete::hex_u32,
    sequence::preceded,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, IResult,
    parsing::{checked_digits, consumed, wrapping_digits},
};

type DefaultError<'a> = nom::error::Error<&'a str>;

/// A coordinate split into whole degrees and the remaining fraction.
///
/// The fraction is kept in billionths of a degree so that accumulation stays in
/// integer arithmetic. The sign is carried separately since NMEA transmits it as
/// a hemisphere letter in its own term.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawDegrees {
    /// Whole degrees
    pub deg: u16,
    /// Fractional part in billionths of a degree
    pub billionths: u32,
    /// Southern or western hemisphere
    pub negative: bool,
}

impl RawDegrees {
    /// Returns the signed decimal degrees.
    ///
    /// ```rust
    /// use nmea0183_stream::RawDegrees;
    ///
    /// let raw = RawDegrees { deg: 97, billionths: 821_453_333, negative: true };
    /// assert!((raw.to_degrees() + 97.821453333).abs() < 1e-9);
    /// ```
    pub fn to_degrees(&self) -> f64 {
        let value = f64::from(self.deg) + f64::from(self.billionths) / 1_000_000_000.0;
        if self.negative { -value } else { value }
    }
}

/// How numeric terms are decoded.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NumericMode {
    #[default]
    /// Decode the numeric prefix of a term and ignore the rest.
    ///
    /// A term without any digits decodes to zero. Receivers in the field emit
    /// plenty of half-filled terms and this mode accepts all of them.
    Lenient,

    /// Every numeric term must be a complete number.
    ///
    /// A malformed term causes the whole sentence it belongs to to be rejected
    /// once its checksum is verified.
    Strict,
}

impl NumericMode {
    /// Decodes a hundredths fixed-point term according to the mode.
    pub fn fixed_point(self, term: &str) -> Option<i32> {
        match self {
            NumericMode::Lenient => Some(decode_fixed_point(term)),
            NumericMode::Strict => strict_fixed_point::<DefaultError<'_>>(term)
                .ok()
                .map(|(_, v)| v),
        }
    }

    /// Decodes a `ddmm.mmmm` coordinate term according to the mode.
    pub fn degrees(self, term: &str) -> Option<RawDegrees> {
        match self {
            NumericMode::Lenient => Some(decode_degrees(term)),
            NumericMode::Strict => strict_degrees::<DefaultError<'_>>(term).ok().map(|(_, v)| v),
        }
    }

    /// Decodes an unsigned integer term according to the mode.
    pub fn unsigned(self, term: &str) -> Option<u32> {
        match self {
            NumericMode::Lenient => Some(decode_unsigned(term)),
            NumericMode::Strict => strict_unsigned::<DefaultError<'_>>(term).ok().map(|(_, v)| v),
        }
    }
}

fn negative_sign<'a, E>(i: &'a str) -> IResult<&'a str, bool, E>
where
    E: ParseError<&'a str>,
{
    opt(one_of("+-")).map(|sign| sign == Some('-')).parse(i)
}

/// Value of the first two fractional digits, in hundredths.
fn hundredths(digits: &str) -> i32 {
    let mut digits = digits.bytes().map(|d| i32::from(d - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    tenths * 10 + hundredths
}

/// Parses a decimal number into hundredths.
///
/// An optional sign is followed by the integer part and an optional fraction;
/// only the first two fractional digits count. Parsing stops at the first
/// character that does not fit and never fails.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{IResult, decode::fixed_point};
///
/// let result: IResult<_, _> = fixed_point("123.456,N");
/// assert_eq!(result, Ok((",N", 12345)));
/// ```
pub fn fixed_point<'a, E>(i: &'a str) -> IResult<&'a str, i32, E>
where
    E: ParseError<&'a str>,
{
    let (i, (negative, whole, fraction)) = (
        negative_sign,
        wrapping_digits,
        opt(preceded(char('.'), digit0)),
    )
        .parse(i)?;

    let value = (whole as i32)
        .wrapping_mul(100)
        .wrapping_add(fraction.map_or(0, hundredths));

    Ok((i, if negative { value.wrapping_neg() } else { value }))
}

/// Strict counterpart of [`fixed_point`].
///
/// The whole term must be a number with at least one integer digit, and a
/// decimal point must be followed by digits. Values beyond the `i32` range of
/// hundredths are reported as [`Error::Overflow`].
///
/// ```rust
/// use nmea0183_stream::{Error, IResult, decode::strict_fixed_point};
///
/// let result: IResult<_, _> = strict_fixed_point("-1.2");
/// assert_eq!(result, Ok(("", -120)));
///
/// let result: IResult<_, _> = strict_fixed_point("1.2x");
/// assert_eq!(result, Err(nom::Err::Error(Error::InvalidField("x"))));
/// ```
pub fn strict_fixed_point<'a, E>(i: &'a str) -> IResult<&'a str, i32, E>
where
    E: ParseError<&'a str>,
{
    if i.is_empty() {
        return Err(nom::Err::Error(Error::Empty));
    }

    let (rest, (negative, whole, fraction)) = consumed((
        negative_sign,
        checked_digits,
        opt(preceded(char('.'), digit1)),
    ))
    .parse(i)?;

    let value = i32::try_from(whole)
        .ok()
        .and_then(|whole| whole.checked_mul(100))
        .and_then(|whole| whole.checked_add(fraction.map_or(0, hundredths)))
        .ok_or(nom::Err::Error(Error::Overflow(i)))?;

    Ok((rest, if negative { -value } else { value }))
}

/// Converts the integer part and fraction digits of a `ddmm.mmmm` term.
///
/// Minutes are accumulated in ten-millionths of a minute with a shrinking
/// multiplier and divided by 60 once, with rounding, at the end.
fn raw_degrees(left_of_decimal: u32, fraction: &str) -> RawDegrees {
    let minutes = left_of_decimal % 100;
    let mut multiplier = 10_000_000u32;
    let mut ten_millionths_of_minutes = u64::from(minutes) * u64::from(multiplier);

    for d in fraction.bytes() {
        multiplier /= 10;
        ten_millionths_of_minutes += u64::from(d - b'0') * u64::from(multiplier);
    }

    RawDegrees {
        deg: (left_of_decimal / 100) as u16,
        billionths: ((5 * ten_millionths_of_minutes + 1) / 3) as u32,
        negative: false,
    }
}

/// Parses an NMEA `ddmm.mmmm` or `dddmm.mmmm` coordinate.
///
/// The last two digits of the integer part are minutes, the rest are degrees.
/// The hemisphere is not part of this term, so the result is never negative.
///
/// ```rust
/// use nmea0183_stream::decode::degrees;
///
/// let (_, raw) = degrees::<nom::error::Error<_>>("4807.038").unwrap();
/// assert_eq!(raw.deg, 48);
/// assert_eq!(raw.billionths, 117_300_000);
/// ```
pub fn degrees<'a, E>(i: &'a str) -> IResult<&'a str, RawDegrees, E>
where
    E: ParseError<&'a str>,
{
    let (i, (left_of_decimal, fraction)) =
        (wrapping_digits, opt(preceded(char('.'), digit0))).parse(i)?;

    Ok((i, raw_degrees(left_of_decimal, fraction.unwrap_or(""))))
}

/// Strict counterpart of [`degrees`].
pub fn strict_degrees<'a, E>(i: &'a str) -> IResult<&'a str, RawDegrees, E>
where
    E: ParseError<&'a str>,
{
    if i.is_empty() {
        return Err(nom::Err::Error(Error::Empty));
    }

    let (rest, (left_of_decimal, fraction)) =
        consumed((checked_digits, opt(preceded(char('.'), digit1)))).parse(i)?;

    if left_of_decimal / 100 > u32::from(u16::MAX) {
        return Err(nom::Err::Error(Error::Overflow(i)));
    }

    Ok((rest, raw_degrees(left_of_decimal, fraction.unwrap_or(""))))
}

/// Strict unsigned integer term, such as a satellite count or a packed date.
pub fn strict_unsigned<'a, E>(i: &'a str) -> IResult<&'a str, u32, E>
where
    E: ParseError<&'a str>,
{
    if i.is_empty() {
        return Err(nom::Err::Error(Error::Empty));
    }

    consumed(checked_digits).parse(i)
}

/// Parses the two hexadecimal digits of a checksum term.
///
/// Only the first two characters are looked at; both upper and lower case
/// digits are accepted.
///
/// ```rust
/// use nmea0183_stream::{IResult, decode::checksum};
///
/// let result: IResult<_, _> = checksum("7c");
/// assert_eq!(result, Ok(("", 0x7C)));
/// ```
pub fn checksum<'a, E>(i: &'a str) -> IResult<&'a str, u8, E>
where
    E: ParseError<&'a str>,
{
    let (rest, digits) = take(2u8).parse(i)?;
    let (_, digits) = consumed(hex_digit1).parse(digits)?;
    let (_, cc) = hex_u32.parse(digits)?;

    Ok((rest, cc as u8))
}

/// Decodes a decimal number into hundredths, leniently.
///
/// ```rust
/// use nmea0183_stream::decode_fixed_point;
///
/// assert_eq!(decode_fixed_point("035.50"), 3550);
/// assert_eq!(decode_fixed_point("-1.2"), -120);
/// assert_eq!(decode_fixed_point("-0.1"), -10);
/// assert_eq!(decode_fixed_point("12.3456"), 1234);
/// assert_eq!(decode_fixed_point("junk"), 0);
/// ```
pub fn decode_fixed_point(text: &str) -> i32 {
    fixed_point::<DefaultError<'_>>(text).map_or(0, |(_, v)| v)
}

/// Decodes an NMEA coordinate term, leniently.
///
/// ```rust
/// use nmea0183_stream::decode_degrees;
///
/// let raw = decode_degrees("4807.038");
/// assert_eq!(raw.deg, 48);
/// assert!((raw.to_degrees() - 48.1173).abs() < 1e-9);
/// ```
pub fn decode_degrees(text: &str) -> RawDegrees {
    degrees::<DefaultError<'_>>(text).map_or(RawDegrees::default(), |(_, v)| v)
}

/// Decodes the unsigned numeric prefix of a term, leniently.
///
/// ```rust
/// use nmea0183_stream::decode_unsigned;
///
/// assert_eq!(decode_unsigned("030913"), 30913);
/// assert_eq!(decode_unsigned("08x"), 8);
/// assert_eq!(decode_unsigned(""), 0);
/// ```
pub fn decode_unsigned(text: &str) -> u32 {
    wrapping_digits::<DefaultError<'_>>(text).map_or(0, |(_, v)| v)
}

/// Decodes a checksum term; `None` when it does not start with two hex digits.
pub fn decode_checksum(text: &str) -> Option<u8> {
    checksum::<DefaultError<'_>>(text).ok().map(|(_, cc)| cc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point() {
        assert_eq!(decode_fixed_point("035.50"), 3550);
        assert_eq!(decode_fixed_point("-1.2"), -120);
        assert_eq!(decode_fixed_point("+7.05"), 705);
        assert_eq!(decode_fixed_point("161.46"), 16146);
        assert_eq!(decode_fixed_point("0.67"), 67);
        assert_eq!(decode_fixed_point("1."), 100);
        assert_eq!(decode_fixed_point(".5"), 50);
        assert_eq!(decode_fixed_point(""), 0);
        assert_eq!(decode_fixed_point("12abc"), 1200);
    }

    #[test]
    fn test_strict_fixed_point() {
        let ok = |s| strict_fixed_point::<DefaultError<'_>>(s).map(|(_, v)| v);

        assert_eq!(ok("035.50"), Ok(3550));
        assert_eq!(ok("-0.1"), Ok(-10));
        assert_eq!(ok("545.4"), Ok(54540));
        assert_eq!(ok(""), Err(nom::Err::Error(Error::Empty)));
        assert_eq!(ok("12abc"), Err(nom::Err::Error(Error::InvalidField("abc"))));
        assert_eq!(ok("1."), Err(nom::Err::Error(Error::InvalidField("."))));
        assert_eq!(
            ok("99999999"),
            Err(nom::Err::Error(Error::Overflow("99999999")))
        );
        assert!(ok("abc").is_err());
    }

    #[test]
    fn test_degrees() {
        let raw = decode_degrees("3014.1984");
        assert_eq!(raw.deg, 30);
        assert_eq!(raw.billionths, 236_640_000);
        assert!(!raw.negative);

        let raw = decode_degrees("09749.2872");
        assert_eq!(raw.deg, 97);
        assert_eq!(raw.billionths, 821_453_333);

        let raw = decode_degrees("12311.76");
        assert_eq!(raw.deg, 123);
        assert_eq!(raw.billionths, 196_000_000);

        // digits past the ten-millionth of a minute no longer contribute
        assert_eq!(decode_degrees("4807.0380000001"), decode_degrees("4807.038"));

        assert_eq!(decode_degrees("N"), RawDegrees::default());
    }

    #[test]
    fn test_strict_degrees() {
        let ok = |s| strict_degrees::<DefaultError<'_>>(s).map(|(_, v)| v);

        assert_eq!(ok("4807.038"), Ok(decode_degrees("4807.038")));
        assert_eq!(ok("4807"), Ok(decode_degrees("4807")));
        assert!(ok("48x7.038").is_err());
        assert!(ok("").is_err());
        assert_eq!(
            ok("9999999.0"),
            Err(nom::Err::Error(Error::Overflow("9999999.0")))
        );
    }

    #[test]
    fn test_unsigned() {
        assert_eq!(NumericMode::Lenient.unsigned("x"), Some(0));
        assert_eq!(NumericMode::Strict.unsigned("x"), None);
        assert_eq!(NumericMode::Strict.unsigned("12"), Some(12));
        assert_eq!(NumericMode::Strict.unsigned(""), None);
    }

    #[test]
    fn test_checksum() {
        assert_eq!(decode_checksum("7C"), Some(0x7C));
        assert_eq!(decode_checksum("7c"), Some(0x7C));
        assert_eq!(decode_checksum("4F\r"), Some(0x4F));
        assert_eq!(decode_checksum("7"), None);
        assert_eq!(decode_checksum("G1"), None);
        assert_eq!(decode_checksum(""), None);
    }
}
