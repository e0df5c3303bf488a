//! Custom parsing model with byte-level precision
//!
//! This module, along with its submodules, provides the fundamental
//! definitions related to the abstract task of processing raw sequences
//! of BCS-encoded data into the low-level fragments at the leaf nodes of
//! an arbitrarily complex Move value.
//!
//! For schema-aware parsing, see [`Layout`](crate::layout::Layout), which
//! drives a `Parser` according to a binary schema, and the
//! [`Decode`](crate::conv::Decode) trait, which does the same for Rust types
//! with a fixed encoding.
//!
//! # Layout
//!
//! The top-level of this module defines the [`Parser`] trait. The
//! submodule `error` defines the hierachy of error cases that can be
//! encountered when something goes wrong during a call to a `Parser` method,
//! and `sliceparser` contains the borrowed-buffer implementation that the
//! rest of the crate uses.

pub mod error;
pub mod sliceparser;

pub use error::ParseResult;
use error::{BufferError, ParseError, TokenError};

/// Largest element-count a BCS sequence length-prefix may declare.
pub const MAX_SEQUENCE_LENGTH: usize = (1 << 31) - 1;

/// Maximum number of bytes in a ULEB128 prefix holding a 32-bit value.
const MAX_ULEB128_WIDTH: usize = 5;

/// # Parser
///
/// This trait is an abstraction over types respresenting a stateful
/// parse-object, with default implementations for a variety of monomorphic
/// `take_*` functions on top of a small set of required primitives.
///
/// ## Model
///
/// * The Parser-object is constructed over an immutable byte-buffer.
/// * All parsing is done in a non-backtracking, zero-lookahead fashion; a byte in the buffer
///   can only be viewed by consuming it, and only after all preceding indices in the buffer
///   have been consumed; after a byte is consumed, it cannot be consumed again.
///
/// The following properties should be respected by each implementation:
///
/// * A fresh `p : impl Parser` object should have `p.offset() == 0` and `p.view_len()` equal to the length of the parse-buffer
/// * `self.remainder()` is the largest possible `n` for which `self.consume(n)` returns an `Ok(_)` value
/// * The value of `self.remainder()` should decrease by `n` after a successful `self.consume(n)`, and remain unchanged after a failed one
///
/// All multi-byte integers are read little-endian, as BCS prescribes.
pub trait Parser {
    /// Computes the length of the Parser's buffer.
    fn view_len(&self) -> usize;

    /// Computes the current value of the offset into the Parser's buffer.
    ///
    /// This should increase by exactly the number of bytes consumed
    /// by any method that returns bytes from the buffer.
    fn offset(&self) -> usize;

    /// Computes the remaining number of bytes that can be safely consumed.
    fn remainder(&self) -> usize {
        self.view_len() - self.offset()
    }

    /// Consumes and returns a single byte from the current offset position
    /// in the buffer.
    fn consume_byte(&mut self) -> ParseResult<u8>;

    /// Attempt to consume and return a slice of length `nbytes`,
    /// starting from the first unconsumed byte in the buffer.
    ///
    /// # Invariants
    ///
    /// This method **MUST** return `Ok(s)` when and only when the buffer
    /// holds at least `nbytes` more bytes, and in such cases, `s.len()` must
    /// be equal to `nbytes`. Otherwise it must return
    /// [`BufferError::Truncated`] without consuming anything.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Consumes `N` bytes and returns them in array-form
    fn consume_arr<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        error::coerce_slice(self.consume(N)?)
    }

    /// Consumes one byte and returns it as a `u8` value
    #[inline]
    fn take_u8(&mut self) -> ParseResult<u8> {
        self.consume_byte()
    }

    /// Consumes two bytes and returns the corresponding little-endian `u16` value
    #[inline]
    fn take_u16(&mut self) -> ParseResult<u16> {
        self.consume_arr::<2>().map(u16::from_le_bytes)
    }

    /// Consumes four bytes and returns the corresponding little-endian `u32` value
    #[inline]
    fn take_u32(&mut self) -> ParseResult<u32> {
        self.consume_arr::<4>().map(u32::from_le_bytes)
    }

    /// Consumes eight bytes and returns the corresponding little-endian `u64` value
    #[inline]
    fn take_u64(&mut self) -> ParseResult<u64> {
        self.consume_arr::<8>().map(u64::from_le_bytes)
    }

    /// Consumes sixteen bytes and returns the corresponding little-endian `u128` value
    #[inline]
    fn take_u128(&mut self) -> ParseResult<u128> {
        self.consume_arr::<16>().map(u128::from_le_bytes)
    }

    /// Consumes a single byte and returns the boolean value it represents
    ///
    /// The only valid BCS boolean encodings are `0x01` for `true`
    /// and `0x00` for `false`.
    ///
    /// # Errors
    ///
    /// If the consume operation itself fails, returns the original errors.
    ///
    /// Otherwise, returns `InvalidBoolean` containing the invalid byte,
    /// wrapped suitably as a `ParseError`
    #[inline]
    fn take_bool(&mut self) -> ParseResult<bool> {
        match self.consume_byte()? {
            0x01 => Ok(true),
            0x00 => Ok(false),
            byte => Err(ParseError::from(TokenError::InvalidBoolean(byte))),
        }
    }

    /// Consumes and returns a `Vec<u8>` of length `nbytes`, following
    /// the same behavioral guarantees as [`consume`](Parser::consume).
    #[inline]
    fn take_dynamic(&mut self, nbytes: usize) -> ParseResult<Vec<u8>> {
        self.consume(nbytes).map(Vec::from)
    }

    /// Consumes and returns an array of the constant length `N`
    #[inline]
    fn take_fixed<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        self.consume_arr::<N>()
    }

    /// Consumes bytes until the predicate `is_terminal` is satisfied,
    /// returning a `Vec<u8>` consisting of all the bytes that were
    /// consumed, up until and including the first byte that satisfied
    /// the predicate.
    ///
    /// At most `limit` bytes are consumed; if the predicate has not been
    /// satisfied by then, returns `UlebOverflow`. Running out of buffer
    /// first is reported as truncation, like any other short read.
    fn take_self_terminating<F>(&mut self, is_terminal: F, limit: usize) -> ParseResult<Vec<u8>>
    where
        F: Fn(u8) -> bool,
    {
        let mut ret: Vec<u8> = Vec::with_capacity(limit.min(self.remainder()));
        loop {
            if ret.len() == limit {
                break Err(ParseError::from(TokenError::UlebOverflow(ret)));
            }
            let byte = self.consume_byte()?;
            ret.push(byte);
            if is_terminal(byte) {
                break Ok(ret);
            }
        }
    }

    /// Consumes a ULEB128-encoded `u32`, as used by BCS for sequence
    /// length-prefixes and enum discriminants.
    ///
    /// Only the canonical (shortest) encoding of each value is accepted.
    fn take_uleb128(&mut self) -> ParseResult<u32> {
        let raw = self.take_self_terminating(|byte| byte & 0x80 == 0, MAX_ULEB128_WIDTH)?;
        let mut acc: u64 = 0;
        for (ix, byte) in raw.iter().enumerate() {
            acc |= u64::from(byte & 0x7f) << (7 * ix);
        }
        if acc > u64::from(u32::MAX) {
            return Err(TokenError::UlebOverflow(raw).into());
        }
        if raw.len() > 1 && raw[raw.len() - 1] == 0 {
            return Err(TokenError::NonCanonicalUleb(raw).into());
        }
        Ok(acc as u32)
    }

    /// Consumes a sequence length-prefix and checks it against
    /// [`MAX_SEQUENCE_LENGTH`].
    fn take_length(&mut self) -> ParseResult<usize> {
        let len = self.take_uleb128()? as usize;
        if len > MAX_SEQUENCE_LENGTH {
            return Err(crate::error::LengthError::TooLong {
                limit: MAX_SEQUENCE_LENGTH,
                actual: len,
            }
            .into());
        }
        Ok(len)
    }

    /// Checks that every byte of the buffer has been consumed.
    fn finish(&self) -> ParseResult<()> {
        match self.remainder() {
            0 => Ok(()),
            residual => Err(BufferError::Trailing { residual }.into()),
        }
    }
}

pub use sliceparser::SliceParser;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn little_endian_reads() {
        let mut p = SliceParser::new(&[0x03, 0, 0, 0, 0, 0, 0, 0, 0x34, 0x12]);
        assert_eq!(p.take_u64(), Ok(3));
        assert_eq!(p.take_u16(), Ok(0x1234));
        assert_eq!(p.remainder(), 0);
    }

    #[test]
    fn uleb128_values() {
        assert_eq!(SliceParser::new(&[0x00]).take_uleb128(), Ok(0));
        assert_eq!(SliceParser::new(&[0x7f]).take_uleb128(), Ok(127));
        assert_eq!(SliceParser::new(&[0x80, 0x01]).take_uleb128(), Ok(128));
        assert_eq!(
            SliceParser::new(&[0xff, 0xff, 0xff, 0xff, 0x0f]).take_uleb128(),
            Ok(u32::MAX)
        );
    }

    #[test]
    fn uleb128_rejects() {
        assert!(matches!(
            SliceParser::new(&[0x80, 0x00]).take_uleb128(),
            Err(ParseError::Token(TokenError::NonCanonicalUleb(_)))
        ));
        assert!(matches!(
            SliceParser::new(&[0xff, 0xff, 0xff, 0xff, 0x1f]).take_uleb128(),
            Err(ParseError::Token(TokenError::UlebOverflow(_)))
        ));
        assert!(SliceParser::new(&[0x80, 0x80])
            .take_uleb128()
            .unwrap_err()
            .is_truncated());
    }

    #[test]
    fn bool_strictness() {
        assert_eq!(SliceParser::new(&[0x01]).take_bool(), Ok(true));
        assert_eq!(
            SliceParser::new(&[0xff]).take_bool(),
            Err(ParseError::Token(TokenError::InvalidBoolean(0xff)))
        );
    }

    #[test]
    fn short_buffer_is_truncation() {
        let mut p = SliceParser::new(&[1, 2, 3]);
        let err = p.take_u32().unwrap_err();
        assert!(err.is_truncated());
        assert_eq!(p.remainder(), 3);
    }
}
