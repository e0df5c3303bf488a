//! Arbitrary-precision representation of the Move `u256` type
//!
//! `u8` through `u128` are carried by the native Rust integer types, which
//! are lossless at every width. `u256` has no native counterpart, so it is
//! wrapped around [`BigUint`] with a range check on every way in.

extern crate num_bigint;

use std::{convert::TryFrom, fmt::Display, ops::Deref, str::FromStr};

use ::num_bigint::BigUint;

use crate::conv::{target::Target, Decode, Encode};
use crate::error::WidthError;
use crate::parse::{ParseResult, Parser};

/// Byte-width of a `u256` on the wire
pub const U256_WIDTH: usize = 32;

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Default)]
#[repr(transparent)]
pub struct U256(BigUint);

impl U256 {
    /// Largest representable value, `2^256 - 1`
    #[must_use]
    pub fn max_value() -> Self {
        Self(BigUint::from_bytes_le(&[0xff; U256_WIDTH]))
    }

    /// Wraps `nat`, failing if it needs more than 256 bits.
    pub fn new(nat: BigUint) -> Result<Self, WidthError> {
        let width = ((nat.bits() + 7) / 8) as usize;
        if width > U256_WIDTH {
            return Err(WidthError::TooWide {
                limit: U256_WIDTH,
                actual: width,
            });
        }
        Ok(Self(nat))
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    pub const fn as_inner(&self) -> &BigUint {
        &self.0
    }

    /// Returns the 32-byte little-endian encoding of `self`.
    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; U256_WIDTH] {
        let mut ret = [0u8; U256_WIDTH];
        let raw = self.0.to_bytes_le();
        ret[..raw.len()].copy_from_slice(&raw);
        ret
    }

    #[must_use]
    pub fn from_le_bytes(bytes: [u8; U256_WIDTH]) -> Self {
        Self(BigUint::from_bytes_le(&bytes))
    }
}

impl std::fmt::Debug for U256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "u256({})", &self.0)
    }
}

impl Display for U256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        <BigUint as Display>::fmt(&self.0, f)
    }
}

impl From<U256> for BigUint {
    fn from(val: U256) -> Self {
        val.0
    }
}

impl TryFrom<BigUint> for U256 {
    type Error = WidthError;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

macro_rules! impl_u256_from {
    ( $( $src:ty ),* ) => {
        $(
            impl From<$src> for U256 {
                fn from(val: $src) -> Self {
                    Self(BigUint::from(val))
                }
            }
        )*
    };
}

impl_u256_from!(u8, u16, u32, u64, u128);

impl Deref for U256 {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Reasons a decimal string is not a valid `u256`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum U256ParseError {
    /// Empty, or containing something other than ASCII decimal digits
    InvalidDigits(String),
    /// Well-formed but greater than `2^256 - 1`
    Overflow(WidthError),
}

impl Display for U256ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDigits(s) => write!(f, "`{}` is not a decimal integer", s),
            Self::Overflow(err) => write!(f, "value out of range for u256: {}", err),
        }
    }
}

impl std::error::Error for U256ParseError {}

impl FromStr for U256 {
    type Err = U256ParseError;

    /// Parses a plain decimal string; signs, separators and radix prefixes
    /// are all rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(U256ParseError::InvalidDigits(s.to_owned()));
        }
        match BigUint::parse_bytes(s.as_bytes(), 10) {
            Some(nat) => Self::new(nat).map_err(U256ParseError::Overflow),
            None => Err(U256ParseError::InvalidDigits(s.to_owned())),
        }
    }
}

impl Encode for U256 {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.to_le_bytes()) + crate::resolve_zero!(buf)
    }
}

impl Decode for U256 {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self::from_le_bytes(p.take_fixed::<U256_WIDTH>()?))
    }
}
