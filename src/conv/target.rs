/// Byte-oriented sink that BCS values are serialized into
///
/// `Target` plays the role of [`std::io::Write`] for the encoding side of the
/// crate, except that every `push_*` method is infallible and total: the
/// returned `usize` is the number of bytes written, kept only so callers can
/// tally the length of what they serialized.
pub trait Target {
    /// Returns a fresh object of the `Self` type with an initially empty buffer.
    fn create() -> Self;

    /// Hint that at least `extra` more bytes are about to be written.
    ///
    /// A no-op for sinks without a notion of capacity.
    #[inline(always)]
    fn anticipate(&mut self, _extra: usize) {}

    /// Appends a single byte, returning `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends the bytes of a fixed-length array, returning `N`.
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize;

    /// Appends the bytes of an arbitrary slice, returning its length.
    ///
    /// Must be indistinguishable, in value and effect, from calling
    /// `push_one` on every element in order.
    fn push_all(&mut self, buf: &[u8]) -> usize;

    /// Marks the end of a logical unit of `push_*` calls.
    ///
    /// Must not affect the contents of the buffer.
    #[inline(always)]
    fn resolve(&mut self) {}

    /// Calls [`resolve`](Target::resolve) and returns `0`, for use at the
    /// tail of a summed chain of writes.
    #[inline]
    fn resolve_zero(&mut self) -> usize {
        self.resolve();
        0
    }

    /// Appends `val` as an unsigned LEB128 integer, returning the number of
    /// bytes written.
    ///
    /// BCS uses this for sequence length-prefixes; the output is always
    /// the minimal encoding, which is what the decoder demands.
    fn push_uleb128(&mut self, mut val: u32) -> usize {
        let mut written = 0;
        loop {
            let group = (val & 0x7f) as u8;
            val >>= 7;
            if val == 0 {
                written += self.push_one(group);
                break written;
            }
            written += self.push_one(group | 0x80);
        }
    }
}

#[macro_export]
macro_rules! resolve_zero {
    ( $buf:expr ) => {{
        $crate::conv::target::Target::resolve($buf);
        0
    }};
}

/// Alias for `std::io::Sink` used to count the number of bytes a value
/// serializes to, without performing any memory operations.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline]
    fn create() -> Self {
        std::io::sink()
    }

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_many<const N: usize>(&mut self, _: [u8; N]) -> usize {
        N
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    #[must_use]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.extend_from_slice(&arr);
        N
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}
