//! Builder type implemented as a newtype around `Vec<u8>`
//!
//! StrictBuilder is named after Haskell's `Data.ByteString.Strict`.

use std::borrow::Borrow;

use crate::conv::target::Target;

/// Newtype around `Vec<u8>` to use as Builder
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Default)]
#[repr(transparent)]
pub struct StrictBuilder(Vec<u8>);

impl Borrow<[u8]> for StrictBuilder {
    fn borrow(&self) -> &[u8] {
        self.0.borrow()
    }
}

impl From<StrictBuilder> for Vec<u8> {
    fn from(val: StrictBuilder) -> Self {
        val.0
    }
}

impl From<Vec<u8>> for StrictBuilder {
    fn from(buf: Vec<u8>) -> StrictBuilder {
        StrictBuilder(buf)
    }
}

impl Target for StrictBuilder {
    fn create() -> Self {
        Self(Vec::create())
    }

    fn anticipate(&mut self, extra: usize) {
        self.0.anticipate(extra)
    }

    fn push_one(&mut self, b: u8) -> usize {
        self.0.push_one(b)
    }

    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.0.push_many(arr)
    }

    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.0.push_all(buf)
    }
}

impl super::Builder for StrictBuilder {
    /// In order to distinguish between finalized and non-finalized
    /// `StrictBuilders`, `Final := Vec<u8>` is used over `Final := Self`
    type Final = Vec<u8>;

    fn finalize(self) -> Self::Final {
        self.0
    }

    fn len(&self) -> usize {
        Vec::len(&self.0)
    }
}

#[cfg(test)]
mod test {
    use crate::{Builder, Encode, StrictBuilder};

    #[test]
    fn hex_output() {
        let b = vec![true, false].encode::<StrictBuilder>();
        assert_eq!(b.len(), 3);
        assert_eq!(b.into_hex(), "020100");
    }
}
