//! Error types used to report failure in low-level parsing
//!
//! This module contains a hierarchy of types representing specific
//! classes of error that may arise as a result of calls to
//! [`Parser`](crate::parse::Parser) methods.
//!
//! # Layout
//!
//! This module defines the primary type `ParseError` and the alias
//! `ParseResult<T>`; it additionally defines various type-level refinements of
//! `ParseError`, grouped according to similar provenance or nature.

use std::array::TryFromSliceError;
use std::error::Error;
use std::fmt::{Display, Formatter, Result};
use std::string::FromUtf8Error;

use crate::error::{LengthError, WidthError};

/// Enumeration type over all errors that may be encountered when calling
/// methods on `Parser` types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Error class encountered when the buffer does not hold the number of
    /// bytes the layout calls for, in either direction.
    Buffer(BufferError),
    /// Error class encountered when internal invariants or preconditions are violated
    Internal(InternalError),
    /// Error class encountered when low-level parsing is successful but
    /// the resultant raw value cannot be converted into a legal value of
    /// a post-parse type
    External(ExternalError),
    /// Error class encountered when low-level parsing is unsuccessful due
    /// to a failure of expectation in terms of the binary-lexical contents
    /// of the buffer.
    ///
    /// This includes illegal values for bytes intended to represent booleans,
    /// and malformed ULEB128 length-prefixes.
    Token(TokenError),
}

impl ParseError {
    /// Returns `true` if this error was caused by a buffer holding fewer
    /// bytes than the layout being parsed requires.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, ParseError::Buffer(BufferError::Truncated { .. }))
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ParseError::Buffer(err) => Display::fmt(err, f),
            ParseError::Internal(err) => Display::fmt(err, f),
            ParseError::External(err) => Display::fmt(err, f),
            ParseError::Token(err) => Display::fmt(err, f),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Buffer(err) => Some(err),
            ParseError::Internal(err) => Some(err),
            ParseError::External(err) => Some(err),
            ParseError::Token(err) => Some(err),
        }
    }
}

/// Type alias for Result with an error type of [`ParseError`]
///
/// Most `Parser` methods, [`Layout::parse`](crate::layout::Layout::parse),
/// and every [`Decode::parse`](crate::conv::Decode::parse) implementation
/// return `ParseResult<T>` for various `T`
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors relating the length of the input buffer to the length the layout
/// calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A consume operation asked for more bytes than remain in the buffer.
    ///
    /// Decoding never pads or defaults a short buffer; this is the error
    /// every such case surfaces as.
    Truncated {
        offset: usize,
        requested: usize,
        limit: usize,
    },
    /// Parsing finished with unconsumed bytes left over.
    ///
    /// Only reported by whole-buffer decodes, and only when the
    /// `check_complete_parse` feature is enabled.
    Trailing { residual: usize },
}

impl From<BufferError> for ParseError {
    fn from(err: BufferError) -> Self {
        Self::Buffer(err)
    }
}

impl Display for BufferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match *self {
            BufferError::Truncated {
                limit,
                offset,
                requested,
            } => {
                write!(
                    f,
                    "cannot consume {} bytes (currently at byte {} of a {}-byte buffer)",
                    requested, offset, limit
                )
            }
            BufferError::Trailing { residual } => {
                write!(f, "{} unconsumed bytes left over after parse", residual)
            }
        }
    }
}

impl Error for BufferError {}

/// Errors arising from unexpected tokens in the buffer
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenError {
    /// Byte intended as a boolean was neither `0x00` nor `0x01`
    InvalidBoolean(u8),
    /// ULEB128 prefix encoded a value wider than 32 bits
    UlebOverflow(Vec<u8>),
    /// ULEB128 prefix had redundant trailing zero-groups
    NonCanonicalUleb(Vec<u8>),
}

impl From<TokenError> for ParseError {
    fn from(tok_e: TokenError) -> Self {
        Self::Token(tok_e)
    }
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidBoolean(byte) => {
                write!(f, "invalid boolean encoding 0x{byte:02x}")
            }
            Self::UlebOverflow(buf) => {
                write!(
                    f,
                    "length-prefix does not fit in 32 bits: {}",
                    crate::hexstring::hex_of_bytes(buf)
                )
            }
            Self::NonCanonicalUleb(buf) => {
                write!(
                    f,
                    "length-prefix is not minimally encoded: {}",
                    crate::hexstring::hex_of_bytes(buf)
                )
            }
        }
    }
}

impl Error for TokenError {}

/// Implementation-internal errors
///
/// This error class represents certain 'impossible' cases, which signify
/// an implementation bug in a `Parser` type rather than a problem with the
/// buffer contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalError {
    SliceCoerceFailure,
}

impl From<TryFromSliceError> for InternalError {
    fn from(_: TryFromSliceError) -> Self {
        Self::SliceCoerceFailure
    }
}

impl From<InternalError> for ParseError {
    fn from(err: InternalError) -> Self {
        Self::Internal(err)
    }
}

impl Display for InternalError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            InternalError::SliceCoerceFailure => {
                write!(f, "failed to coerce from byte-slice to fixed-length array")
            }
        }
    }
}

impl Error for InternalError {}

/// Converts a borrowed byte-slice into an owned byte-array
///
/// Returns a [`ParseError`] corresponding to the reason for
/// failure if this conversion cannot be performed for any reason.
///
/// This error is guaranteed to be an `InternalError`.
pub(crate) fn coerce_slice<const N: usize>(bytes: &'_ [u8]) -> ParseResult<[u8; N]> {
    match <[u8; N] as std::convert::TryFrom<&'_ [u8]>>::try_from(bytes) {
        Ok(array) => Ok(array),
        Err(err) => Err(ParseError::from(InternalError::from(err))),
    }
}

/// Enumerated type representing contextually invalid results obtained from otherwise
/// succesfully executed method calls to a Parser object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalError {
    /// Error scenario in which a coercion from `&[u8]` to `String` performed on the result
    /// of a `consume` operation could not be performed for the specified reason (`FromUtf8Error`).
    UncoercableString(FromUtf8Error),
    /// Error scenario in which a value could not be accepted without violating a
    /// schema-level constraint on its byte-width.
    WidthViolation(WidthError),
    /// Error scenario in which a value could not be accepted without violating a
    /// schema-level constraint on its element-count.
    LengthViolation(LengthError),
}

impl<T> From<T> for ParseError
where
    ExternalError: From<T>,
{
    fn from(err: T) -> Self {
        ParseError::External(ExternalError::from(err))
    }
}

impl From<FromUtf8Error> for ExternalError {
    fn from(err: FromUtf8Error) -> Self {
        Self::UncoercableString(err)
    }
}

impl From<LengthError> for ExternalError {
    fn from(err: LengthError) -> Self {
        Self::LengthViolation(err)
    }
}

impl From<WidthError> for ExternalError {
    fn from(err: WidthError) -> Self {
        Self::WidthViolation(err)
    }
}

impl Display for ExternalError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ExternalError::UncoercableString(err) => {
                write!(
                    f,
                    "parsed byte-array could not be coerced to String: {}",
                    err
                )
            }
            ExternalError::LengthViolation(x) => {
                write!(f, "{}", x)
            }
            ExternalError::WidthViolation(x) => {
                write!(f, "{}", x)
            }
        }
    }
}

impl Error for ExternalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExternalError::UncoercableString(err) => Some(err),
            ExternalError::WidthViolation(err) => Some(err),
            ExternalError::LengthViolation(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn parse_error_threadsafe() {
        dummy::<ParseError>()
    }

    #[test]
    fn truncation_is_detected() {
        let err: ParseError = BufferError::Truncated {
            offset: 4,
            requested: 8,
            limit: 6,
        }
        .into();
        assert!(err.is_truncated());
        assert!(!ParseError::from(TokenError::InvalidBoolean(2)).is_truncated());
    }
}
