//! Reification and transcoding of Move object schemas
//!
//! # Overview
//!
//! Objects on a Move chain are delivered in one of three encodings: raw BCS
//! bytes, the *typed-fields* tree that a node API produces by partially
//! parsing those bytes server-side, and a plain JSON form used for display
//! and storage. This crate turns any of the three into an in-memory value of
//! a known shape, and back.
//!
//! The unit of dispatch is the *reified descriptor* ([`Reified`]): a runtime
//! value standing in for a Move type, which knows the type's full name, its
//! binary [`Layout`], and how to decode each encoding. Descriptors come in
//! two flavors that share the same rules:
//!
//! * statically-typed shapes under [`framework`], where a `Coin<T>`
//!   descriptor is built from a phantom descriptor for `T` and decodes into
//!   a [`framework::sui::Coin`];
//! * dynamic descriptors ([`DynReified`]), assembled at runtime by a
//!   [`StructClassLoader`] from a type string and decoding into a generic
//!   [`DecodedValue`] tree.
//!
//! # Layers
//!
//! From the bottom up:
//!
//! * [`parse`], [`conv`] and [`builder`]: the binary codec. [`Decode`] and
//!   [`Encode`] define BCS for the scalar types ([`prim`], [`U256`],
//!   [`Address`]) over a [`Parser`] and a [`Target`].
//! * [`typetag`]: parsing and normalization of type strings.
//! * [`layout`]: runtime binary schemas and the raw [`MoveValue`] tree they
//!   parse into.
//! * [`reified`]: the descriptor traits and the JSON conventions.
//! * [`framework`], [`dynamic`], [`loader`] and [`fetch`]: shapes, runtime
//!   descriptors, the registry of declarations and the object-source seam.
//!
//! # Example
//!
//! ```
//! use reified::loader::STD_LOADER;
//! use reified::{Reified, ToJsonField};
//!
//! let r = STD_LOADER.reified("0x1::option::Option<u64>").unwrap();
//! let val = r.from_bcs(&[0x01, 0x2a, 0, 0, 0, 0, 0, 0, 0]).unwrap();
//! assert_eq!(val.to_json_field(), serde_json::json!("42"));
//! ```

pub mod address;
pub mod builder;
pub mod conv;
pub mod dynamic;
pub mod error;
pub mod fetch;
pub mod framework;
pub mod hexstring;
pub mod layout;
pub mod loader;
pub mod parse;
pub mod prelude;
pub mod prim;
pub mod reified;
pub mod special;
pub mod typetag;
pub mod uint;

pub use crate::address::Address;
pub use crate::builder::{strict::StrictBuilder, Builder};
pub use crate::conv::{target::Target, Decode, DecodeError, DecodeResult, Encode};
pub use crate::dynamic::{DecodedStruct, DecodedValue, DynReified, StructDecl};
pub use crate::fetch::{fetch, fetch_dynamic, FetchError, ObjectBcs, ObjectSource};
pub use crate::layout::{Layout, MoveStruct, MoveValue};
pub use crate::loader::{StructClassLoader, STD_LOADER};
pub use crate::parse::{error::ParseError, sliceparser::SliceParser, ParseResult, Parser};
pub use crate::reified::{
    PhantomReified, Reified, ReifyError, ReifyResult, StructClass, StructReified, ToJsonField,
    TypeArgument,
};
pub use crate::typetag::{Primitive, StructTag, TypeTag};
pub use crate::uint::U256;
