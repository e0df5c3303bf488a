//! General error types
//!
//! This module contains the leaf-level error types that are shared between
//! the binary, typed-fields and JSON conversion paths. None of them carry
//! any notion of the schema being decoded; that context is added by the
//! error types of [`parse`](crate::parse), [`conv`](crate::conv) and
//! [`reified`](crate::reified) that wrap them.

use std::error::Error;
use std::fmt::{Debug, Display};
use std::num::TryFromIntError;

/// Enumerated error type for failures related to schema constructs
/// that impose a check on the byte-width of their prospective values.
///
/// Structurally similar to [`LengthError`], an analoguous error-type
/// relating to the number of elements in a collection-type, rather than
/// the number of bytes in a potentially opaque schema type.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum WidthError {
    /// Restriction on maximum byte-width exceeded
    TooWide { limit: usize, actual: usize },
    /// Requirement of precise byte-width not satisfied
    WrongWidth { exact: usize, actual: usize },
}

impl Display for WidthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidthError::TooWide { limit, actual } => {
                write!(f, "{actual}-byte value exceeded limit of {limit} bytes")
            }
            WidthError::WrongWidth { exact, actual } => {
                write!(
                    f,
                    "{actual}-byte value violated requirement of {exact} bytes"
                )
            }
        }
    }
}

impl Error for WidthError {}

/// Enumerated error type for failures related to the element-count
/// of a sequence.
///
/// BCS sequences carry a ULEB128 length-prefix that is bounded above
/// by [`MAX_SEQUENCE_LENGTH`](crate::parse::MAX_SEQUENCE_LENGTH); a
/// prefix that exceeds it is reported as [`LengthError::TooLong`].
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum LengthError {
    /// Restriction on maximum element-count exceeded
    TooLong { limit: usize, actual: usize },
    /// Requirement of precise element-count not satisfied
    WrongLength { exact: usize, actual: usize },
}

impl Display for LengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthError::TooLong { limit, actual } => {
                write!(
                    f,
                    "{actual}-element value exceeded limit of {limit} elements"
                )
            }
            LengthError::WrongLength { exact, actual } => {
                write!(
                    f,
                    "{actual}-element value violated requirement of {exact} elements"
                )
            }
        }
    }
}

impl Error for LengthError {}

/// Error type representing all possible conditions for invalidity
/// encountered when attempting to parse a string-type as a series
/// of hex-encoded bytes.
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd)]
pub enum HexConvError {
    /// Error case for odd-length strings
    OddParity(String),
    /// Error case for strings containing non-hex characters,
    /// i.e. anything not in `[0-9a-fA-F]`.
    NonHex(String),
}

impl Debug for HexConvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OddParity(invalid) => {
                write!(f, "non-even length-parity for string `{}`", invalid)
            }
            Self::NonHex(invalid) => write!(f, "non-hex character found in string `{}`", invalid),
        }
    }
}

impl Display for HexConvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OddParity(_) => {
                write!(f, "hex-conversion failed on odd-length string")
            }
            Self::NonHex(_) => {
                write!(f, "hex-conversion failed on non-hex character")
            }
        }
    }
}

impl Error for HexConvError {}

/// Error type representing an integral value that does not fit into the
/// fixed-width integer type dictated by its schema.
///
/// `Ext` is the type both the offending value and the bound are widened to
/// before comparison; in practice this is `u128` for the native-width
/// integers and [`U256`](crate::uint::U256) is reported through
/// [`WidthError`] instead.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BoundsError<Ext: Debug> {
    Overflow { max: Ext, val: Ext },
    Failed(TryFromIntError),
}

impl<Ext: Debug> From<TryFromIntError> for BoundsError<Ext> {
    fn from(err: TryFromIntError) -> Self {
        Self::Failed(err)
    }
}

impl BoundsError<u128> {
    /// Narrows `val` into the integer type `T`, reporting the maximum of `T`
    /// alongside the offending value when it does not fit.
    pub fn restrict<T>(val: u128) -> Result<T, Self>
    where
        T: TryFrom<u128> + Into<u128> + Bounded,
    {
        match T::try_from(val) {
            Ok(ret) => Ok(ret),
            Err(_) => Err(BoundsError::Overflow {
                max: T::MAX_VALUE.into(),
                val,
            }),
        }
    }
}

/// Unsigned integer types with a statically known maximum, used as the
/// target of [`BoundsError::restrict`].
pub trait Bounded: Sized {
    const MAX_VALUE: Self;
}

macro_rules! impl_bounded {
    ($($t:ty),*) => {
        $( impl Bounded for $t { const MAX_VALUE: Self = <$t>::MAX; } )*
    };
}

impl_bounded!(u8, u16, u32, u64, u128);

impl<Ext: Debug + Display> Display for BoundsError<Ext> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsError::Overflow { ref max, ref val } => {
                write!(
                    f,
                    "provided value {} greater than maximum bound {}",
                    val, max
                )
            }
            BoundsError::Failed(err) => {
                write!(f, "could not convert for bounds-checking: {}", err)
            }
        }
    }
}

impl<Ext: Display + Debug> std::error::Error for BoundsError<Ext> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}
