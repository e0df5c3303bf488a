//! Validated conversion to and from hex-encoded strings
//!
//! Account addresses, object identifiers and test vectors for the binary
//! encoding are all exchanged as hex-strings: ASCII strings matching
//! `(0x)?([0-9a-fA-F]{2})*`. Case is not significant on input, and output is
//! always lower-case.

use crate::error::HexConvError;
use std::fmt::Write;

/// Formats a sequence of bytes into an undelimited, unprefixed,
/// lower-case hexadecimal `String`
///
/// # Examples
///
/// ```
/// # use reified::hexstring::hex_of_bytes;
/// assert_eq!(hex_of_bytes(&[0xde, 0xad, 0xbe, 0xef]), String::from("deadbeef"));
/// ```
#[must_use]
#[inline]
pub fn hex_of_bytes(bytes: &[u8]) -> String {
    let mut hex: String = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        match write!(&mut hex, "{byte:02x}") {
            Ok(_) => (),
            Err(_) => unreachable!("write to String should never fail"),
        };
    }
    hex
}

/// Attempt to parse a hexadecimally encoded string, with or without a
/// leading `0x`, returning the decoded bytes.
///
/// # Errors
///
/// If the string (minus any `0x` prefix) has odd parity, `Err(OddParity)` is
/// returned.
///
/// Otherwise, if the string contains any character that is not a valid
/// hexadecimal digit (case-insensitive), returns `Err(NonHex(s))` where `s`
/// is the original string.
pub fn bytes_of_hex(s: &str) -> Result<Vec<u8>, HexConvError> {
    let digits = strip_prefix(s);
    if digits.len() % 2 != 0 {
        return Err(HexConvError::OddParity(s.to_owned()));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexConvError::NonHex(s.to_owned()));
    }
    (0..digits.len())
        .step_by(2)
        .map(|ix| {
            u8::from_str_radix(&digits[ix..ix + 2], 16)
                .map_err(|_| HexConvError::NonHex(s.to_owned()))
        })
        .collect()
}

/// Returns `s` with a single leading `0x` (or `0X`) removed, if present.
#[must_use]
#[inline]
pub fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        assert_eq!(bytes_of_hex("0xDEADbeef"), Ok(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(hex_of_bytes(&[0x00, 0x0f, 0xf0]), "000ff0");
        assert_eq!(bytes_of_hex(""), Ok(vec![]));
    }

    #[test]
    fn hex_rejects() {
        assert!(matches!(bytes_of_hex("abc"), Err(HexConvError::OddParity(_))));
        assert!(matches!(bytes_of_hex("0xzz"), Err(HexConvError::NonHex(_))));
    }
}
