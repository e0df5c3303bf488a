//! Runtime binary schemas and the raw values they parse into
//!
//! A [`Layout`] describes the exact byte layout of a Move value: scalars,
//! length-prefixed vectors, and structs as the concatenation of their
//! fields in declaration order. Parsing with a layout produces a
//! [`MoveValue`], a schema-shaped tree with no interpretation applied yet
//! (an `Option` is still a vector, a `String` is still a struct around a
//! byte vector). [`MoveValue`] re-encodes to exactly the bytes it was
//! parsed from.
//!
//! Phantom type arguments never appear in a layout: they contribute no
//! bytes, so a `Balance<T>` has the same layout for every `T`.

use crate::address::Address;
use crate::conv::{target::Target, DecodeResult, Encode};
use crate::error::LengthError;
use crate::prim::check_length;
use crate::parse::{ParseResult, Parser, SliceParser};
use crate::typetag::Primitive;
use crate::uint::U256;

/// Binary schema of a Move value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Vector(Box<Layout>),
    Struct(StructLayout),
}

/// Binary schema of a struct: its full type name and its fields, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
    pub type_name: String,
    pub fields: Vec<(String, Layout)>,
}

impl StructLayout {
    pub fn new(type_name: impl Into<String>, fields: Vec<(String, Layout)>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }
}

impl From<Primitive> for Layout {
    fn from(prim: Primitive) -> Self {
        match prim {
            Primitive::Bool => Layout::Bool,
            Primitive::U8 => Layout::U8,
            Primitive::U16 => Layout::U16,
            Primitive::U32 => Layout::U32,
            Primitive::U64 => Layout::U64,
            Primitive::U128 => Layout::U128,
            Primitive::U256 => Layout::U256,
            Primitive::Address => Layout::Address,
        }
    }
}

impl Layout {
    #[must_use]
    pub fn vector(elem: Layout) -> Self {
        Layout::Vector(Box::new(elem))
    }

    /// Returns `true` for a layout that occupies no bytes: a struct whose
    /// fields, if any, all occupy no bytes.
    ///
    /// No Move type has such a layout; one can only be built by hand.
    #[must_use]
    pub fn is_zero_sized(&self) -> bool {
        match self {
            Layout::Struct(layout) => layout.fields.iter().all(|(_, field)| field.is_zero_sized()),
            _ => false,
        }
    }

    /// Parses one value of this layout from the parser's current position.
    pub fn parse<P: Parser>(&self, p: &mut P) -> ParseResult<MoveValue> {
        use crate::conv::Decode;

        Ok(match self {
            Layout::Bool => MoveValue::Bool(p.take_bool()?),
            Layout::U8 => MoveValue::U8(p.take_u8()?),
            Layout::U16 => MoveValue::U16(p.take_u16()?),
            Layout::U32 => MoveValue::U32(p.take_u32()?),
            Layout::U64 => MoveValue::U64(p.take_u64()?),
            Layout::U128 => MoveValue::U128(p.take_u128()?),
            Layout::U256 => MoveValue::U256(U256::parse(p)?),
            Layout::Address => MoveValue::Address(Address::parse(p)?),
            Layout::Vector(elem) => {
                let len = p.take_length()?;
                if len > 0 && elem.is_zero_sized() {
                    return Err(LengthError::TooLong {
                        limit: 0,
                        actual: len,
                    }
                    .into());
                }
                // every element is now at least a byte wide, so a prefix
                // claiming more elements than there are bytes left cannot
                // succeed
                let mut elts = Vec::with_capacity(len.min(p.remainder()));
                for _ in 0..len {
                    elts.push(elem.parse(p)?);
                }
                MoveValue::Vector(elts)
            }
            Layout::Struct(layout) => {
                let mut fields = Vec::with_capacity(layout.fields.len());
                for (name, field) in layout.fields.iter() {
                    fields.push((name.clone(), field.parse(p)?));
                }
                MoveValue::Struct(MoveStruct {
                    type_name: layout.type_name.clone(),
                    fields,
                })
            }
        })
    }

    /// Parses a complete buffer holding exactly one value of this layout.
    ///
    /// Leftover bytes are an error when the `check_complete_parse` feature
    /// is enabled.
    pub fn decode(&self, bytes: &[u8]) -> DecodeResult<MoveValue> {
        let mut p = SliceParser::new(bytes);
        let ret = self.parse(&mut p)?;
        cfg_if::cfg_if! {
            if #[cfg(feature = "check_complete_parse")] {
                p.finish()?;
            }
        }
        Ok(ret)
    }
}

/// Raw value produced by parsing a [`Layout`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256(U256),
    Address(Address),
    Vector(Vec<MoveValue>),
    Struct(MoveStruct),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveStruct {
    pub type_name: String,
    pub fields: Vec<(String, MoveValue)>,
}

impl MoveStruct {
    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&MoveValue> {
        self.fields
            .iter()
            .find_map(|(key, val)| (key == name).then_some(val))
    }

    /// Returns the name of the first field not in `expected`, if any.
    #[must_use]
    pub fn unexpected_field(&self, expected: &[&str]) -> Option<&str> {
        self.fields
            .iter()
            .map(|(key, _)| key.as_str())
            .find(|key| !expected.contains(key))
    }
}

impl MoveValue {
    /// Short name of the variant, for error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MoveValue::Bool(_) => "bool",
            MoveValue::U8(_) => "u8",
            MoveValue::U16(_) => "u16",
            MoveValue::U32(_) => "u32",
            MoveValue::U64(_) => "u64",
            MoveValue::U128(_) => "u128",
            MoveValue::U256(_) => "u256",
            MoveValue::Address(_) => "address",
            MoveValue::Vector(_) => "vector",
            MoveValue::Struct(_) => "struct",
        }
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&MoveStruct> {
        match self {
            MoveValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vector(&self) -> Option<&[MoveValue]> {
        match self {
            MoveValue::Vector(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Collects a `vector<u8>` into its bytes.
    #[must_use]
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        self.as_vector()?
            .iter()
            .map(|elt| match elt {
                MoveValue::U8(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Checks that every vector in the value can be encoded with a length
    /// prefix that decodes again.
    pub fn check_lengths(&self) -> Result<(), LengthError> {
        match self {
            MoveValue::Vector(elts) => {
                check_length(elts.len())?;
                elts.iter().try_for_each(MoveValue::check_lengths)
            }
            MoveValue::Struct(s) => s.fields.iter().try_for_each(|(_, v)| v.check_lengths()),
            _ => Ok(()),
        }
    }

    /// Builds a `vector<u8>` value from raw bytes.
    #[must_use]
    pub fn bytes(raw: &[u8]) -> Self {
        MoveValue::Vector(raw.iter().copied().map(MoveValue::U8).collect())
    }
}

impl Encode for MoveValue {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        (match self {
            MoveValue::Bool(b) => b.write_to(buf),
            MoveValue::U8(n) => n.write_to(buf),
            MoveValue::U16(n) => n.write_to(buf),
            MoveValue::U32(n) => n.write_to(buf),
            MoveValue::U64(n) => n.write_to(buf),
            MoveValue::U128(n) => n.write_to(buf),
            MoveValue::U256(n) => n.write_to(buf),
            MoveValue::Address(addr) => addr.write_to(buf),
            MoveValue::Vector(elts) => elts.write_to(buf),
            MoveValue::Struct(s) => s.fields.iter().map(|(_, v)| v.write_to(buf)).sum(),
        }) + crate::resolve_zero!(buf)
    }
}
