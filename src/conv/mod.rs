//! Core of the binary-conversion API
//!
//! This module contains definitions for the transcoding traits `Encode` and
//! `Decode`, which play the same role for the BCS wire format that
//! `Serialize` and `Deserialize` play for `serde`.
//!
//! `Encode` is implemented by every value that can be written back out as
//! BCS, from the scalar primitives up to the dynamic
//! [`MoveValue`](crate::layout::MoveValue) tree and the typed framework
//! shapes. `Decode` is implemented by those types whose encoding is fixed
//! by the type alone; values whose layout is only known at runtime are
//! parsed through [`Layout`](crate::layout::Layout) instead.
//!
//! The submodule [`target`] defines the [`target::Target`] trait, the dual to
//! [`crate::parse::Parser`] that bounds the output buffer of
//! [`Encode::write_to`].

use crate::hexstring::bytes_of_hex;
use crate::parse::{ParseResult, Parser, SliceParser};

use self::target::Target;

pub mod error;
pub mod target;

pub use error::{DecodeError, DecodeResult};

/// Sums the byte-counts of a sequence of `write_to` calls on the same
/// target, then resolves the target.
#[macro_export]
macro_rules! write_all_to {
    ($($x:expr),* $(,)? => $tgt:expr) => {
        { $( $x.write_to($tgt) + )* $crate::conv::target::Target::resolve_zero($tgt) }
    };
}

/// Trait for types that serialize into the canonical BCS binary form
///
/// Implementing [`Encode`] requires only [`write_to`](Encode::write_to); the
/// remaining methods are conveniences over it.
pub trait Encode {
    /// Appends the serialized bytes of this value to a generic buffer,
    /// returning the exact number of bytes written
    ///
    /// The natural definition of this method is structurally inductive on
    /// the fields of the type in question, in declaration order.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize;

    /// Appends the serialized bytes of this value to a [`Vec<u8>`].
    #[inline]
    fn write_to_vec(&self, buf: &mut Vec<u8>) {
        let _ = self.write_to(buf);
    }

    /// Creates a new buffer and fills it with the serialized bytes of this value.
    #[must_use]
    #[inline]
    fn encode<U: Target>(&self) -> U {
        let mut buf: U = U::create();
        let _ = self.write_to::<U>(&mut buf);
        buf
    }

    /// Creates a [`Vec<u8>`] and fills it with the serialized bytes of this value.
    #[must_use]
    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_vec(&mut buf);
        buf
    }

    /// Computes, without allocation, the number of bytes in the serialized
    /// form of `self`.
    #[must_use]
    #[inline]
    fn enc_len(&self) -> usize {
        self.write_to(&mut std::io::sink())
    }
}

/// Trait for types with a fixed BCS encoding that can be read back out of a
/// buffer
///
/// Implementations are defined by one required method, [`parse`](Decode::parse),
/// which consumes exactly the bytes of one value from a [`Parser`] and
/// either returns it or the reason it could not.
///
/// # Example
///
/// ```
/// use reified::parse::{Parser, ParseResult};
/// use reified::Decode;
///
/// #[derive(Debug, PartialEq)]
/// pub struct Flagged {
///     is_set: bool,
///     id: u16,
/// }
///
/// impl Decode for Flagged {
///     fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
///         Ok(Self { is_set: bool::parse(p)?, id: u16::parse(p)? })
///     }
/// }
///
/// assert_eq!(
///     Flagged::try_decode(&[0x01, 0x2a, 0x00]).unwrap(),
///     Flagged { is_set: true, id: 42 }
/// );
/// ```
pub trait Decode {
    /// Attempt to consume and interpret a value of type `Self` from an existing
    /// `Parser` object over a binary buffer.
    ///
    /// # Errors
    ///
    /// In most cases, the errors returned by this method will be propogated from
    /// calls made to [`Parser`] methods in the implementation logic.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self>
    where
        Self: Sized;

    /// Decodes a value of type `Self` from a complete buffer.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by [`parse`](Decode::parse).
    ///
    /// If the feature-flag `check_complete_parse` is enabled, bytes left over
    /// once the value has been parsed are reported as
    /// [`BufferError::Trailing`](crate::parse::error::BufferError::Trailing).
    fn try_decode(input: &[u8]) -> DecodeResult<Self>
    where
        Self: Sized,
    {
        let mut p = SliceParser::new(input);
        let ret = Self::parse(&mut p)?;
        cfg_if::cfg_if! {
            if #[cfg(feature = "check_complete_parse")] {
                p.finish()?;
            }
        }
        Ok(ret)
    }

    /// Decodes a value of type `Self` from a hex-encoded buffer, with or
    /// without a leading `0x`.
    fn try_decode_hex(input: &str) -> DecodeResult<Self>
    where
        Self: Sized,
    {
        let bytes = bytes_of_hex(input)?;
        Self::try_decode(&bytes)
    }
}
