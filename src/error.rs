//! # Error Types
//!
//! This module defines the error types used by the strict decoders and by the
//! custom field registry. The streaming path itself never fails: it reports
//! outcomes through the boolean returned by
//! [`StreamParser::encode`](crate::StreamParser::encode) and the parser counters.

use core::fmt;

use nom::error::{ErrorKind, FromExternalError, ParseError};

/// Holds the result of decoding functions.
///
/// It depends on the input type `I`, the output type `O`, and the error type `E`
/// (by default `nom::error::Error<I>`).
///
/// The `Ok` side is a pair containing the remainder of the input (the part of the data that
/// was not decoded) and the produced value. The `Err` side contains an instance of `nom::Err`.
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, Error<I, E>>;

/// Represents all possible errors that can occur when a term is decoded strictly.
///
/// Lenient decoding never produces these; it falls back to the numeric prefix
/// of the term instead.
#[derive(Debug, PartialEq)]
pub enum Error<I, E> {
    /// The term was empty.
    Empty,

    /// The term could not be decoded because its format was invalid.
    ///
    /// This wraps nom's standard parsing errors.
    ParsingError(E),

    /// The term has characters after the numeric value.
    ///
    /// Contains the part of the input that was left over.
    InvalidField(I),

    /// The value does not fit in the fixed-point representation.
    ///
    /// Contains the input that caused the overflow.
    Overflow(I),
}

impl<I, E> ParseError<I> for Error<I, E>
where
    E: ParseError<I>,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Error::ParsingError(E::from_error_kind(input, kind))
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E, EX> FromExternalError<I, EX> for Error<I, E>
where
    E: FromExternalError<I, EX>,
{
    fn from_external_error(input: I, kind: ErrorKind, e: EX) -> Self {
        Error::ParsingError(E::from_external_error(input, kind, e))
    }
}

impl<I, E> fmt::Display for Error<I, E>
where
    I: fmt::Debug + fmt::Display,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "empty term"),
            Error::ParsingError(e) => write!(f, "malformed term: {e:?}"),
            Error::InvalidField(rest) => write!(f, "unexpected trailing characters {rest:?}"),
            Error::Overflow(i) => write!(f, "value out of range: {i}"),
        }
    }
}

impl<I, E> core::error::Error for Error<I, E>
where
    I: fmt::Debug + fmt::Display,
    E: fmt::Debug,
{
}

/// Errors returned when registering a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Every slot of the fixed custom field arena is taken.
    Full,

    /// The sentence name is longer than a term can ever be, so it would never match.
    NameTooLong,

    /// Term 0 is the sentence identifier and cannot carry a custom value.
    ZeroTermIndex,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Full => write!(f, "custom field registry is full"),
            RegistryError::NameTooLong => write!(
                f,
                "sentence name exceeds {} characters",
                crate::MAX_TERM_LEN
            ),
            RegistryError::ZeroTermIndex => write!(f, "custom fields start at term 1"),
        }
    }
}

impl core::error::Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err: Error<&str, nom::error::Error<&str>> = Error::InvalidField("ab");
        assert_eq!(err.to_string(), "unexpected trailing characters \"ab\"");

        let err: Error<&str, nom::error::Error<&str>> = Error::Overflow("4294967296");
        assert_eq!(err.to_string(), "value out of range: 4294967296");

        assert_eq!(
            RegistryError::NameTooLong.to_string(),
            "sentence name exceeds 14 characters"
        );
    }
}
