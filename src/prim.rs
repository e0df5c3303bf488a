//! `Encode` and `Decode` for the scalar and sequence types of BCS
//!
//! Integers are fixed-width little-endian, booleans are a single
//! `0x00`/`0x01` byte, and every variable-length sequence (including
//! strings) carries a ULEB128 element-count prefix.

use crate::conv::{target::Target, Decode, Encode};
use crate::error::LengthError;
use crate::parse::{ParseResult, Parser, MAX_SEQUENCE_LENGTH};

impl Encode for bool {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_one(u8::from(*self)) + crate::resolve_zero!(buf)
    }
}

impl Decode for bool {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_bool()
    }
}

macro_rules! impl_uint {
    ( $( $t:ty => $take:ident ),+ $(,)? ) => {
        $(
            impl Encode for $t {
                fn write_to<U: Target>(&self, buf: &mut U) -> usize {
                    buf.push_many(self.to_le_bytes()) + crate::resolve_zero!(buf)
                }
            }

            impl Decode for $t {
                #[inline]
                fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                    p.$take()
                }
            }
        )+
    };
}

impl_uint!(u8 => take_u8, u16 => take_u16, u32 => take_u32, u64 => take_u64, u128 => take_u128);

/// Checks that a sequence of `len` elements can be given a length prefix
/// that decodes again.
pub fn check_length(len: usize) -> Result<(), LengthError> {
    if len > MAX_SEQUENCE_LENGTH {
        Err(LengthError::TooLong {
            limit: MAX_SEQUENCE_LENGTH,
            actual: len,
        })
    } else {
        Ok(())
    }
}

/// Writes the ULEB128 length-prefix of a sequence of `len` elements.
///
/// `Encode` is infallible, so lengths past [`MAX_SEQUENCE_LENGTH`] are
/// written at the cap; fallible encoders run [`check_length`] first.
pub(crate) fn write_length<U: Target>(len: usize, buf: &mut U) -> usize {
    let capped = len.min(MAX_SEQUENCE_LENGTH) as u32;
    buf.push_uleb128(capped)
}

impl<T: Encode> Encode for Vec<T> {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        let mut written = write_length(self.len(), buf);
        for elt in self.iter() {
            written += elt.write_to(buf);
        }
        written + crate::resolve_zero!(buf)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let len = p.take_length()?;
        // every element occupies at least one byte
        let mut ret = Vec::with_capacity(len.min(p.remainder()));
        for _ in 0..len {
            ret.push(T::parse(p)?);
        }
        Ok(ret)
    }
}

impl Encode for String {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_length(self.len(), buf) + buf.push_all(self.as_bytes()) + crate::resolve_zero!(buf)
    }
}

impl Decode for String {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let len = p.take_length()?;
        let raw = p.take_dynamic(len)?;
        Ok(String::from_utf8(raw)?)
    }
}

/// The Move `Option<T>` is a vector holding zero or one elements.
impl<T: Encode> Encode for Option<T> {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        (match self {
            Some(val) => buf.push_one(0x01) + val.write_to(buf),
            None => buf.push_one(0x00),
        }) + crate::resolve_zero!(buf)
    }
}

impl<T: Decode> Decode for Option<T> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        match p.take_length()? {
            0 => Ok(None),
            1 => Ok(Some(T::parse(p)?)),
            n => Err(LengthError::TooLong { limit: 1, actual: n }.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse::error::{ExternalError, ParseError};

    fn check<T>(bytes: &[u8], val: T)
    where
        T: Encode + Decode + PartialEq + std::fmt::Debug,
    {
        assert_eq!(T::try_decode(bytes), Ok(val));
        assert_eq!(T::try_decode(bytes).map(|v| v.to_bytes()), Ok(bytes.to_vec()));
    }

    #[test]
    fn scalars() {
        check(&[0x01], true);
        check(&[0x2a], 42u8);
        check(&[0x03, 0, 0, 0, 0, 0, 0, 0], 3u64);
        check(&[0xff; 16], u128::MAX);
    }

    #[test]
    fn sequences() {
        check(&[0x03, 0x01, 0x00, 0x01], vec![true, false, true]);
        check(&[0x02, b'h', b'i'], String::from("hi"));
        check(&[0x00], Vec::<u64>::new());
    }

    #[test]
    fn option_lengths() {
        check(&[0x00], None::<u8>);
        check(&[0x01, 0x07], Some(7u8));
        assert_eq!(
            Option::<u8>::try_decode(&[0x02, 0x07, 0x08]),
            Err(ParseError::External(ExternalError::LengthViolation(LengthError::TooLong {
                limit: 1,
                actual: 2
            }))
            .into())
        );
    }

    #[test]
    fn truncated_vector() {
        assert!(Vec::<u16>::try_decode(&[0x02, 0x01, 0x00, 0x02])
            .unwrap_err()
            .is_truncated());
    }

    #[test]
    fn bad_utf8() {
        assert!(matches!(
            String::try_decode(&[0x01, 0xff]),
            Err(crate::conv::DecodeError::Parse(ParseError::External(
                ExternalError::UncoercableString(_)
            )))
        ));
    }

    #[test]
    fn length_cap() {
        assert_eq!(check_length(MAX_SEQUENCE_LENGTH), Ok(()));
        assert_eq!(
            check_length(MAX_SEQUENCE_LENGTH + 1),
            Err(LengthError::TooLong {
                limit: MAX_SEQUENCE_LENGTH,
                actual: MAX_SEQUENCE_LENGTH + 1
            })
        );
        let mut capped = Vec::new();
        write_length(usize::MAX, &mut capped);
        let mut at_cap = Vec::new();
        write_length(MAX_SEQUENCE_LENGTH, &mut at_cap);
        assert_eq!(capped, at_cap);
        assert_eq!(at_cap, vec![0xff, 0xff, 0xff, 0xff, 0x07]);
    }
}
