//! Fixed-width account and package addresses
//!
//! An address is always 32 bytes on the wire. Its textual form is a
//! `0x`-prefixed hex string that may have been written with its leading
//! zeros stripped (`0x2` is the same address as `0x000…002`), so parsing
//! left-pads and display always prints all 64 digits.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::conv::{target::Target, Decode, Encode};
use crate::error::{HexConvError, WidthError};
use crate::hexstring::{hex_of_bytes, strip_prefix};
use crate::parse::{ParseResult, Parser};

/// Byte-width of an address on the wire
pub const ADDRESS_LENGTH: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The all-zero address
    pub const ZERO: Self = Self([0; ADDRESS_LENGTH]);

    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    #[must_use]
    pub const fn into_bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    /// Constructs an address from the low byte alone, as used by the
    /// framework packages `0x1` and `0x2`.
    #[must_use]
    pub const fn from_u8(low: u8) -> Self {
        let mut bytes = [0; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = low;
        Self(bytes)
    }

    /// Formats the address with leading zeros stripped, i.e. the form
    /// type strings are normalized to.
    #[must_use]
    pub fn to_short_string(&self) -> String {
        let full = hex_of_bytes(&self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            String::from("0x0")
        } else {
            format!("0x{}", trimmed)
        }
    }
}

/// Reasons a string is not a valid address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    Hex(HexConvError),
    Width(WidthError),
}

impl From<HexConvError> for AddressError {
    fn from(err: HexConvError) -> Self {
        Self::Hex(err)
    }
}

impl From<WidthError> for AddressError {
    fn from(err: WidthError) -> Self {
        Self::Width(err)
    }
}

impl Display for AddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressError::Hex(err) => write!(f, "invalid address: {}", err),
            AddressError::Width(err) => write!(f, "invalid address: {}", err),
        }
    }
}

impl std::error::Error for AddressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AddressError::Hex(err) => Some(err),
            AddressError::Width(err) => Some(err),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_prefix(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HexConvError::NonHex(s.to_owned()).into());
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(WidthError::TooWide {
                limit: ADDRESS_LENGTH,
                actual: (digits.len() + 1) / 2,
            }
            .into());
        }
        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let raw = crate::hexstring::bytes_of_hex(&padded)?;
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = WidthError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match <[u8; ADDRESS_LENGTH]>::try_from(value) {
            Ok(bytes) => Ok(Self(bytes)),
            Err(_) => Err(WidthError::WrongWidth {
                exact: ADDRESS_LENGTH,
                actual: value.len(),
            }),
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex_of_bytes(&self.0))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Encode for Address {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.0) + crate::resolve_zero!(buf)
    }
}

impl Decode for Address {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self(p.take_fixed::<ADDRESS_LENGTH>()?))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_forms_pad() {
        let two: Address = "0x2".parse().unwrap();
        assert_eq!(two, Address::from_u8(2));
        assert_eq!(
            two.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
        assert_eq!(two.to_short_string(), "0x2");
        assert_eq!(Address::ZERO.to_short_string(), "0x0");
        assert_eq!("0X00ABcd".parse::<Address>().unwrap().to_short_string(), "0xabcd");
    }

    #[test]
    fn rejects() {
        assert!(matches!("0x".parse::<Address>(), Err(AddressError::Hex(_))));
        assert!(matches!("0xg1".parse::<Address>(), Err(AddressError::Hex(_))));
        let long = format!("0x{}", "1".repeat(66));
        assert!(matches!(long.parse::<Address>(), Err(AddressError::Width(_))));
    }

    #[test]
    fn serde_string_form() {
        let addr = Address::from_u8(0xab);
        let json = serde_json::to_value(addr).unwrap();
        assert_eq!(json, serde_json::Value::String(addr.to_string()));
        assert_eq!(serde_json::from_value::<Address>(json).unwrap(), addr);
    }
}
