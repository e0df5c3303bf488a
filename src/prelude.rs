//! Imports for code that consumes decoded objects
//!
//! Brings the descriptor traits into scope along with the descriptor
//! constructors, so that `use reified::prelude::*;` is enough to build and
//! apply descriptors.

pub use crate::reified::{
    phantom, prim, vector, PhantomReified, Reified, ReifyError, ReifyResult, StructClass,
    StructReified, ToJsonField, TypeArgument,
};

pub use crate::dynamic::{field_to_json, DecodedStruct, DecodedValue, DynReified};
pub use crate::framework::move_stdlib::OptionReified;
pub use crate::loader::{StructClassLoader, STD_LOADER};
