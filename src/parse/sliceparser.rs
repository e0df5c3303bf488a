//! Parser over a borrowed byte-slice
//!
//! `SliceParser` is the only `Parser` implementation the crate needs: every
//! decode entry-point receives a buffer that has already been fully
//! delivered, so there is no streaming or windowing to account for.

use super::error::{BufferError, ParseResult};
use super::Parser;

/// Stateful cursor over an immutable byte-slice
#[derive(Debug, Clone)]
pub struct SliceParser<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> SliceParser<'a> {
    /// Constructs a fresh `SliceParser` positioned at the start of `buf`
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    fn truncated(&self, requested: usize) -> BufferError {
        BufferError::Truncated {
            offset: self.offset,
            requested,
            limit: self.buf.len(),
        }
    }
}

impl<'a> From<&'a [u8]> for SliceParser<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl<'a> Parser for SliceParser<'a> {
    #[inline]
    fn view_len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    fn consume_byte(&mut self) -> ParseResult<u8> {
        match self.buf.get(self.offset) {
            Some(&byte) => {
                self.offset += 1;
                Ok(byte)
            }
            None => Err(self.truncated(1).into()),
        }
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        match self.offset.checked_add(nbytes) {
            Some(tgt) if tgt <= self.buf.len() => {
                let ret = &self.buf[self.offset..tgt];
                self.offset = tgt;
                Ok(ret)
            }
            _ => Err(self.truncated(nbytes).into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn consume_advances() {
        let buf = [0xde, 0xad, 0xbe, 0xef];
        let mut p = SliceParser::new(&buf);
        assert_eq!(p.consume(2), Ok(&buf[..2]));
        assert_eq!(p.offset(), 2);
        assert_eq!(p.remainder(), 2);
        assert!(p.finish().is_err());
        assert_eq!(p.consume_byte(), Ok(0xbe));
        assert_eq!(p.consume_byte(), Ok(0xef));
        assert_eq!(p.finish(), Ok(()));
    }

    #[test]
    fn overrun_reports_position() {
        let mut p = SliceParser::new(&[0u8; 3]);
        let _ = p.consume(2);
        assert_eq!(
            p.consume(4),
            Err(BufferError::Truncated {
                offset: 2,
                requested: 4,
                limit: 3
            }
            .into())
        );
        assert_eq!(p.offset(), 2);
    }
}
