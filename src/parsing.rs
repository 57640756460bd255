//! # Parsing Utilities
//!
//! This module provides the small nom parsers the term decoders are built from:
//! digit folding with C-style wrap-around or with overflow detection, and a
//! combinator that ensures a decoder consumed the whole term.

use nom::{
    Err, Input, Mode, OutputMode, PResult, Parser,
    character::complete::{digit0, digit1},
    error::ParseError,
};

use crate::{Error, IResult};

/// Ensures that the parser consumes all input.
///
/// This combinator runs the provided parser and then checks that nothing of the
/// term is left. Any remainder is reported as [`Error::InvalidField`] holding the
/// leftover characters.
///
/// # Arguments
///
/// * `f` - The parser to run
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{Error, IResult, parsing::{consumed, wrapping_digits}};
/// use nom::Parser;
///
/// let result: IResult<_, _> = consumed(wrapping_digits).parse("1234");
/// assert_eq!(result, Ok(("", 1234)));
///
/// let result: IResult<_, _> = consumed(wrapping_digits).parse("12ab");
/// assert_eq!(result, Err(nom::Err::Error(Error::InvalidField("ab"))));
/// ```
pub fn consumed<I, E, F>(f: F) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = Error<I, E>>
where
    I: Input,
    E: ParseError<I>,
    F: Parser<I, Error = Error<I, E>>,
{
    Consumed { f }
}

struct Consumed<F> {
    f: F,
}

impl<I, E, F> Parser<I> for Consumed<F>
where
    I: Input,
    E: ParseError<I>,
    F: Parser<I, Error = Error<I, E>>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = Error<I, E>;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| Error::InvalidField(i))));
        }

        Ok((i, o))
    }
}

/// Folds a (possibly empty) run of ASCII digits into an unsigned value.
///
/// An empty run yields zero and arithmetic wraps on overflow, the same way a
/// C `atol` prefix parse behaves on a free-running receiver stream.
pub fn wrapping_digits<'a, E>(i: &'a str) -> IResult<&'a str, u32, E>
where
    E: ParseError<&'a str>,
{
    digit0
        .map(|digits: &str| {
            digits.bytes().fold(0u32, |acc, d| {
                acc.wrapping_mul(10).wrapping_add(u32::from(d - b'0'))
            })
        })
        .parse(i)
}

/// Folds a non-empty run of ASCII digits into an unsigned value.
///
/// Fails with [`Error::Overflow`] instead of wrapping.
pub fn checked_digits<'a, E>(i: &'a str) -> IResult<&'a str, u32, E>
where
    E: ParseError<&'a str>,
{
    let (rest, digits) = digit1.parse(i)?;

    let value = digits
        .bytes()
        .try_fold(0u32, |acc, d| {
            acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
        })
        .ok_or(Err::Error(Error::Overflow(digits)))?;

    Ok((rest, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_digits() {
        let result: IResult<_, _> = wrapping_digits("0042rest");
        assert_eq!(result, Ok(("rest", 42)));

        let result: IResult<_, _> = wrapping_digits("abc");
        assert_eq!(result, Ok(("abc", 0)));

        let result: IResult<_, _> = wrapping_digits("4294967296");
        assert_eq!(result, Ok(("", 0)));
    }

    #[test]
    fn test_checked_digits() {
        let result: IResult<_, _> = checked_digits("4294967295");
        assert_eq!(result, Ok(("", u32::MAX)));

        let result: IResult<_, _> = checked_digits("4294967296");
        assert_eq!(result, Err(Err::Error(Error::Overflow("4294967296"))));

        let result: IResult<_, _> = checked_digits("x1");
        assert!(result.is_err());
    }
}
