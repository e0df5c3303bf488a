//! Extension trait for Targets that can be frozen into a byte-buffer
//!
//! A `Builder` is a [`Target`] with a terminal operation,
//! [`finalize`](Builder::finalize), that hands its contents over to
//! whatever end-point is meant to consume them. [`Reified::to_bcs`](crate::reified::Reified::to_bcs)
//! serializes through [`StrictBuilder`](strict::StrictBuilder).

use crate::conv::target::Target;
use crate::hexstring::hex_of_bytes;

/// `Target` extension trait for finalizable byte buffers
pub trait Builder
where
    Self: Target + Sized,
{
    /// Type suitable for presenting the finalized contents of a `Builder` object
    type Final: Into<Vec<u8>>;

    /// Converts a `Self` value into a `Self::Final` value once
    /// it is fully built.
    fn finalize(self) -> Self::Final;

    /// Consume the Builder object and return a vector of its contents
    fn into_vec(self) -> Vec<u8> {
        self.finalize().into()
    }

    /// Return a string consisting of the raw hexadecimal sequence of words in the Builder
    fn into_hex(self) -> String {
        hex_of_bytes(&self.into_vec())
    }

    /// Determine the length of the Builder value in bytes
    fn len(&self) -> usize;

    /// Returns `true` if the receiver contains no bytes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub mod strict;
