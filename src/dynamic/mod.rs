//! Descriptors built at runtime from type strings
//!
//! Where the [`framework`](crate::framework) shapes are checked at compile
//! time, a [`DynReified`] is assembled by a
//! [`StructClassLoader`](crate::loader::StructClassLoader) from a type
//! string and the registered [`StructDecl`]s, and decodes into the generic
//! [`DecodedValue`] tree. Both follow the same field-position rules, and
//! the framework types whose node-API encoding is special (see
//! [`crate::special`]) decode to the same bare values here as they do
//! through their static descriptors.

pub mod decl;

use std::sync::Arc;

use log::trace;
use serde_json::{Map, Value as JsonValue};

pub use decl::{FieldDecl, ParamKind, StructDecl, TypeParam};

use crate::address::Address;
use crate::framework::move_stdlib::option::{option_of_raw, raw_of_option};
use crate::framework::move_stdlib::{AsciiStringReified, StringReified};
use crate::framework::sui::{IdReified, UidReified, UrlReified};
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::fields::FieldsWithTypes;
use crate::reified::json::{json_array, json_key, json_str};
use crate::reified::{
    assert_fields_with_types_args_match, assert_reified_type_args_match, expect_struct,
    json_field, json_struct, move_struct, prim, struct_field, PhantomReified, Reified,
    ReifyError, ReifyResult, ShapeError, ToJsonField, TypeArgument,
};
use crate::special;
use crate::typetag::{compose_type, compress_type, parse_type_name, same_type, Primitive};
use crate::uint::U256;

/// A decoded value of a type only known at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256(U256),
    /// An `address`, or an `ID`/`UID` in field position
    Address(Address),
    Vector(Vec<DecodedValue>),
    /// A `String`, `ascii::String` or `Url` in field position
    String(String),
    Option(Option<Box<DecodedValue>>),
    Struct(DecodedStruct),
}

impl DecodedValue {
    /// Short name of the variant, for error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedValue::Bool(_) => "bool",
            DecodedValue::U8(_) => "u8",
            DecodedValue::U16(_) => "u16",
            DecodedValue::U32(_) => "u32",
            DecodedValue::U64(_) => "u64",
            DecodedValue::U128(_) => "u128",
            DecodedValue::U256(_) => "u256",
            DecodedValue::Address(_) => "address",
            DecodedValue::Vector(_) => "vector",
            DecodedValue::String(_) => "string",
            DecodedValue::Option(_) => "option",
            DecodedValue::Struct(_) => "struct",
        }
    }

    #[must_use]
    pub fn primitive(&self) -> Option<Primitive> {
        Some(match self {
            DecodedValue::Bool(_) => Primitive::Bool,
            DecodedValue::U8(_) => Primitive::U8,
            DecodedValue::U16(_) => Primitive::U16,
            DecodedValue::U32(_) => Primitive::U32,
            DecodedValue::U64(_) => Primitive::U64,
            DecodedValue::U128(_) => Primitive::U128,
            DecodedValue::U256(_) => Primitive::U256,
            DecodedValue::Address(_) => Primitive::Address,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&DecodedStruct> {
        match self {
            DecodedValue::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl ToJsonField for DecodedValue {
    fn to_json_field(&self) -> JsonValue {
        match self {
            DecodedValue::Bool(b) => b.to_json_field(),
            DecodedValue::U8(n) => n.to_json_field(),
            DecodedValue::U16(n) => n.to_json_field(),
            DecodedValue::U32(n) => n.to_json_field(),
            DecodedValue::U64(n) => n.to_json_field(),
            DecodedValue::U128(n) => n.to_json_field(),
            DecodedValue::U256(n) => n.to_json_field(),
            DecodedValue::Address(addr) => addr.to_json_field(),
            DecodedValue::Vector(elts) => elts.to_json_field(),
            DecodedValue::String(s) => s.to_json_field(),
            DecodedValue::Option(opt) => opt.to_json_field(),
            DecodedValue::Struct(s) => s.to_json_field(),
        }
    }
}

/// A decoded struct of a type only known at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedStruct {
    type_name: String,
    type_args: Vec<String>,
    fields: Vec<(String, DecodedValue)>,
}

impl DecodedStruct {
    /// Normalized name without type arguments
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn type_args(&self) -> &[String] {
        &self.type_args
    }

    #[must_use]
    pub fn full_type_name(&self) -> String {
        compose_type(&self.type_name, &self.type_args)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&DecodedValue> {
        self.fields
            .iter()
            .find_map(|(key, val)| (key == name).then_some(val))
    }

    /// Fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[(String, DecodedValue)] {
        &self.fields
    }

    /// Renders `{$typeName, $typeArgs, ...fields}`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut obj = Map::new();
        obj.insert(
            String::from("$typeName"),
            JsonValue::String(self.type_name.clone()),
        );
        obj.insert(
            String::from("$typeArgs"),
            JsonValue::Array(self.type_args.iter().cloned().map(JsonValue::String).collect()),
        );
        if let JsonValue::Object(fields) = self.to_json_field() {
            obj.extend(fields);
        }
        JsonValue::Object(obj)
    }
}

impl ToJsonField for DecodedStruct {
    fn to_json_field(&self) -> JsonValue {
        json_struct(
            self.fields
                .iter()
                .map(|(name, val)| (name.as_str(), val.to_json_field()))
                .collect(),
        )
    }
}

/// How a struct is read in field position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Utf8,
    Ascii,
    Url,
    Id,
    Uid,
    Option,
    Balance,
    Plain,
}

impl Shape {
    fn of(type_name: &str) -> Self {
        match type_name {
            special::STRING => Shape::Utf8,
            special::ASCII_STRING => Shape::Ascii,
            special::URL => Shape::Url,
            special::ID => Shape::Id,
            special::UID => Shape::Uid,
            special::OPTION => Shape::Option,
            special::BALANCE => Shape::Balance,
            _ => Shape::Plain,
        }
    }
}

/// A struct descriptor instantiated from a [`StructDecl`]
///
/// Data and phantom type arguments are kept apart: only the former have
/// descriptors, and only they can appear in the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DynStruct {
    decl: Arc<StructDecl>,
    shape: Shape,
    data_args: Vec<DynReified>,
    phantom_args: Vec<PhantomReified>,
    type_args: Vec<String>,
    fields: Vec<(String, DynReified)>,
}

impl DynStruct {
    /// Instantiates `decl`. The arguments of each kind are given in the
    /// order their parameters are declared; `fields` are the descriptors of
    /// the instantiated field types.
    pub(crate) fn new(
        decl: Arc<StructDecl>,
        data_args: Vec<DynReified>,
        phantom_args: Vec<PhantomReified>,
        fields: Vec<(String, DynReified)>,
    ) -> ReifyResult<Self> {
        decl.check_arity(data_args.len() + phantom_args.len())?;
        let mut ret = Self {
            shape: Shape::of(decl.type_name()),
            decl,
            data_args,
            phantom_args,
            type_args: Vec::new(),
            fields,
        };
        let type_args = ret
            .reified_type_args()
            .iter()
            .map(|arg| arg.extract_type())
            .collect();
        ret.type_args = type_args;
        Ok(ret)
    }

    #[must_use]
    pub fn decl(&self) -> &StructDecl {
        &self.decl
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.decl.type_name()
    }

    #[must_use]
    pub fn type_args(&self) -> &[String] {
        &self.type_args
    }

    #[must_use]
    pub fn data_args(&self) -> &[DynReified] {
        &self.data_args
    }

    #[must_use]
    pub fn phantom_args(&self) -> &[PhantomReified] {
        &self.phantom_args
    }

    #[must_use]
    pub fn full_type_name(&self) -> String {
        compose_type(self.type_name(), &self.type_args)
    }

    /// Type arguments in declaration order, phantom or not
    pub fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        let mut data = self.data_args.iter();
        let mut phantom = self.phantom_args.iter();
        self.decl
            .type_params()
            .iter()
            .filter_map(|param| match param.kind {
                ParamKind::Data => data.next().map(|arg| arg as &dyn TypeArgument),
                ParamKind::Phantom => phantom.next().map(|arg| arg as &dyn TypeArgument),
            })
            .collect()
    }

    fn elem(&self) -> ReifyResult<&DynReified> {
        self.data_args
            .first()
            .ok_or_else(|| ReifyError::TypeArgumentCountMismatch {
                type_name: self.type_name().to_owned(),
                expected: 1,
                actual: 0,
            })
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn build(&self, fields: Vec<(String, DecodedValue)>) -> DecodedValue {
        DecodedValue::Struct(DecodedStruct {
            type_name: self.type_name().to_owned(),
            type_args: self.type_args.clone(),
            fields,
        })
    }

    fn mismatch(&self, value: &DecodedValue) -> ReifyError {
        let actual = match value {
            DecodedValue::Struct(s) => s.full_type_name(),
            other => other.kind().to_owned(),
        };
        ReifyError::mismatch(self.full_type_name(), actual)
    }

    fn same_args(&self, type_args: &[String]) -> bool {
        type_args.len() == self.type_args.len()
            && type_args
                .iter()
                .zip(self.type_args.iter())
                .all(|(have, want)| same_type(have, want))
    }

    /// Returns `true` if `type_str` names this struct, with any type
    /// arguments.
    #[must_use]
    pub fn is_type(&self, type_str: &str) -> bool {
        match compress_type(type_str).and_then(|s| parse_type_name(&s)) {
            Ok((name, args)) => name == self.type_name() && args.len() == self.decl.num_type_params(),
            Err(_) => false,
        }
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            self.full_type_name(),
            self.fields
                .iter()
                .map(|(name, r)| (name.clone(), r.layout()))
                .collect(),
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<DecodedValue> {
        match self.shape {
            Shape::Utf8 => StringReified.from_fields(value).map(DecodedValue::String),
            Shape::Ascii => AsciiStringReified.from_fields(value).map(DecodedValue::String),
            Shape::Url => UrlReified.from_fields(value).map(DecodedValue::String),
            Shape::Id => IdReified.from_fields(value).map(DecodedValue::Address),
            Shape::Uid => UidReified.from_fields(value).map(DecodedValue::Address),
            Shape::Option => {
                let elem = self.elem()?;
                let inner = option_of_raw(value)?
                    .map(|elt| elem.from_fields(elt).map(Box::new))
                    .transpose()?;
                Ok(DecodedValue::Option(inner))
            }
            Shape::Balance | Shape::Plain => {
                let s = expect_struct(value, &self.field_names())?;
                let fields = self
                    .fields
                    .iter()
                    .map(|(name, r)| Ok((name.clone(), r.from_fields(struct_field(s, name)?)?)))
                    .collect::<ReifyResult<Vec<_>>>()?;
                Ok(self.build(fields))
            }
        }
    }

    fn to_fields(&self, field: &DecodedValue) -> ReifyResult<MoveValue> {
        match (self.shape, field) {
            (Shape::Utf8, DecodedValue::String(s)) => StringReified.to_fields(s),
            (Shape::Ascii, DecodedValue::String(s)) => AsciiStringReified.to_fields(s),
            (Shape::Url, DecodedValue::String(s)) => UrlReified.to_fields(s),
            (Shape::Id, DecodedValue::Address(addr)) => IdReified.to_fields(addr),
            (Shape::Uid, DecodedValue::Address(addr)) => UidReified.to_fields(addr),
            (Shape::Option, DecodedValue::Option(opt)) => {
                let elem = self.elem()?;
                let elt = opt.as_ref().map(|val| elem.to_fields(val)).transpose()?;
                Ok(raw_of_option(self.full_type_name(), elt))
            }
            (Shape::Balance | Shape::Plain, DecodedValue::Struct(s))
                if s.type_name() == self.type_name() && self.same_args(s.type_args()) =>
            {
                let fields = self
                    .fields
                    .iter()
                    .map(|(name, r)| {
                        let val = s
                            .field(name)
                            .ok_or_else(|| ShapeError::MissingKey(name.clone()))?;
                        Ok((name.as_str(), r.to_fields(val)?))
                    })
                    .collect::<ReifyResult<Vec<_>>>()?;
                Ok(move_struct(self.full_type_name(), fields))
            }
            (_, other) => Err(self.mismatch(other)),
        }
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<DecodedValue> {
        match self.shape {
            Shape::Utf8 => StringReified
                .from_fields_with_types(item)
                .map(DecodedValue::String),
            Shape::Ascii => AsciiStringReified
                .from_fields_with_types(item)
                .map(DecodedValue::String),
            Shape::Url => UrlReified
                .from_fields_with_types(item)
                .map(DecodedValue::String),
            Shape::Id => IdReified
                .from_fields_with_types(item)
                .map(DecodedValue::Address),
            Shape::Uid => UidReified
                .from_fields_with_types(item)
                .map(DecodedValue::Address),
            Shape::Option => match item {
                JsonValue::Null => Ok(DecodedValue::Option(None)),
                _ => {
                    let inner = self.elem()?.from_fields_with_types(item)?;
                    Ok(DecodedValue::Option(Some(Box::new(inner))))
                }
            },
            Shape::Balance if !item.is_object() => {
                let value = prim::U64.from_fields_with_types(item)?;
                Ok(self.build(vec![(String::from("value"), DecodedValue::U64(value))]))
            }
            Shape::Balance | Shape::Plain => {
                let view = FieldsWithTypes::from_json(item)?;
                if !self.is_type(view.type_name()) {
                    return Err(ReifyError::mismatch(self.full_type_name(), view.type_name()));
                }
                assert_fields_with_types_args_match(&view, &self.reified_type_args())?;
                let fields = self
                    .fields
                    .iter()
                    .map(|(name, r)| Ok((name.clone(), r.from_fields_with_types(view.field(name)?)?)))
                    .collect::<ReifyResult<Vec<_>>>()?;
                Ok(self.build(fields))
            }
        }
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<DecodedValue> {
        match self.shape {
            Shape::Utf8 => StringReified.from_json_field(field).map(DecodedValue::String),
            Shape::Ascii => AsciiStringReified
                .from_json_field(field)
                .map(DecodedValue::String),
            Shape::Url => UrlReified.from_json_field(field).map(DecodedValue::String),
            Shape::Id => IdReified.from_json_field(field).map(DecodedValue::Address),
            Shape::Uid => UidReified.from_json_field(field).map(DecodedValue::Address),
            Shape::Option => match field {
                JsonValue::Null => Ok(DecodedValue::Option(None)),
                _ => {
                    let inner = self.elem()?.from_json_field(field)?;
                    Ok(DecodedValue::Option(Some(Box::new(inner))))
                }
            },
            Shape::Balance | Shape::Plain => {
                let fields = self
                    .fields
                    .iter()
                    .map(|(name, r)| Ok((name.clone(), r.from_json_field(json_field(field, name)?)?)))
                    .collect::<ReifyResult<Vec<_>>>()?;
                Ok(self.build(fields))
            }
        }
    }

    fn from_json(&self, json: &JsonValue) -> ReifyResult<DecodedValue> {
        let type_name = json_str(json_key(json, "$typeName")?)?;
        if !same_type(type_name, self.type_name()) {
            return Err(ReifyError::mismatch(self.type_name(), type_name));
        }
        let type_args = json_array(json_key(json, "$typeArgs")?)?
            .iter()
            .map(|arg| json_str(arg).map(str::to_owned))
            .collect::<ReifyResult<Vec<String>>>()?;
        assert_reified_type_args_match(self.type_name(), &type_args, &self.reified_type_args())?;
        self.from_json_field(json)
    }
}

/// Descriptor of a Move type assembled at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum DynReified {
    Primitive(Primitive),
    Vector(Box<DynReified>),
    Struct(Arc<DynStruct>),
}

impl DynReified {
    #[must_use]
    pub fn vector(elem: DynReified) -> Self {
        DynReified::Vector(Box::new(elem))
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&DynStruct> {
        match self {
            DynReified::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` if `type_str` names the type this descriptor stands
    /// for. Struct type arguments are not compared.
    #[must_use]
    pub fn is_type(&self, type_str: &str) -> bool {
        match self {
            DynReified::Struct(s) => s.is_type(type_str),
            _ => same_type(&self.full_type_name(), type_str),
        }
    }

    /// Decodes the output of [`DecodedStruct::to_json`], or for a non-struct
    /// type the output of [`ToJsonField`].
    pub fn from_json(&self, json: &JsonValue) -> ReifyResult<DecodedValue> {
        match self {
            DynReified::Struct(s) => s.from_json(json),
            _ => self.from_json_field(json),
        }
    }

    /// Decodes the parsed contents of an on-chain object as returned by the
    /// node API.
    pub fn from_parsed_data(&self, content: &JsonValue) -> ReifyResult<DecodedValue> {
        let data_type = json_str(json_key(content, "dataType")?)?;
        if data_type != "moveObject" {
            return Err(ShapeError::UnexpectedKind {
                expected: "moveObject",
                found: data_type.to_owned(),
            }
            .into());
        }
        let type_name = json_str(json_key(content, "type")?)?;
        if !self.is_type(type_name) {
            return Err(ReifyError::mismatch(self.full_type_name(), type_name));
        }
        self.from_fields_with_types(content)
    }
}

fn prim_of_raw(prim: Primitive, value: &MoveValue) -> ReifyResult<DecodedValue> {
    Ok(match (prim, value) {
        (Primitive::Bool, MoveValue::Bool(b)) => DecodedValue::Bool(*b),
        (Primitive::U8, MoveValue::U8(n)) => DecodedValue::U8(*n),
        (Primitive::U16, MoveValue::U16(n)) => DecodedValue::U16(*n),
        (Primitive::U32, MoveValue::U32(n)) => DecodedValue::U32(*n),
        (Primitive::U64, MoveValue::U64(n)) => DecodedValue::U64(*n),
        (Primitive::U128, MoveValue::U128(n)) => DecodedValue::U128(*n),
        (Primitive::U256, MoveValue::U256(n)) => DecodedValue::U256(n.clone()),
        (Primitive::Address, MoveValue::Address(addr)) => DecodedValue::Address(*addr),
        (_, other) => {
            return Err(ShapeError::UnexpectedKind {
                expected: prim.name(),
                found: other.kind().to_owned(),
            }
            .into())
        }
    })
}

fn raw_of_prim(prim: Primitive, value: &DecodedValue) -> ReifyResult<MoveValue> {
    Ok(match (prim, value) {
        (Primitive::Bool, DecodedValue::Bool(b)) => MoveValue::Bool(*b),
        (Primitive::U8, DecodedValue::U8(n)) => MoveValue::U8(*n),
        (Primitive::U16, DecodedValue::U16(n)) => MoveValue::U16(*n),
        (Primitive::U32, DecodedValue::U32(n)) => MoveValue::U32(*n),
        (Primitive::U64, DecodedValue::U64(n)) => MoveValue::U64(*n),
        (Primitive::U128, DecodedValue::U128(n)) => MoveValue::U128(*n),
        (Primitive::U256, DecodedValue::U256(n)) => MoveValue::U256(n.clone()),
        (Primitive::Address, DecodedValue::Address(addr)) => MoveValue::Address(*addr),
        (_, other) => return Err(ReifyError::mismatch(prim.name(), other.kind())),
    })
}

/// Typed-fields and JSON carry scalars in the same form.
fn prim_of_json(prim: Primitive, v: &JsonValue) -> ReifyResult<DecodedValue> {
    match prim {
        Primitive::Bool => prim::Bool.from_json_field(v).map(DecodedValue::Bool),
        Primitive::U8 => prim::U8.from_json_field(v).map(DecodedValue::U8),
        Primitive::U16 => prim::U16.from_json_field(v).map(DecodedValue::U16),
        Primitive::U32 => prim::U32.from_json_field(v).map(DecodedValue::U32),
        Primitive::U64 => prim::U64.from_json_field(v).map(DecodedValue::U64),
        Primitive::U128 => prim::U128.from_json_field(v).map(DecodedValue::U128),
        Primitive::U256 => prim::U256.from_json_field(v).map(DecodedValue::U256),
        Primitive::Address => prim::Address.from_json_field(v).map(DecodedValue::Address),
    }
}

impl Reified for DynReified {
    type Field = DecodedValue;

    fn full_type_name(&self) -> String {
        match self {
            DynReified::Primitive(prim) => prim.name().to_owned(),
            DynReified::Vector(elem) => format!("vector<{}>", elem.full_type_name()),
            DynReified::Struct(s) => s.full_type_name(),
        }
    }

    fn layout(&self) -> Layout {
        match self {
            DynReified::Primitive(prim) => Layout::from(*prim),
            DynReified::Vector(elem) => Layout::vector(elem.layout()),
            DynReified::Struct(s) => s.layout(),
        }
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<DecodedValue> {
        match self {
            DynReified::Primitive(prim) => prim_of_raw(*prim, value),
            DynReified::Vector(elem) => {
                let elts = value.as_vector().ok_or_else(|| ShapeError::UnexpectedKind {
                    expected: "vector",
                    found: value.kind().to_owned(),
                })?;
                Ok(DecodedValue::Vector(
                    elts.iter()
                        .map(|elt| elem.from_fields(elt))
                        .collect::<ReifyResult<_>>()?,
                ))
            }
            DynReified::Struct(s) => s.from_fields(value),
        }
    }

    fn to_fields(&self, field: &DecodedValue) -> ReifyResult<MoveValue> {
        match (self, field) {
            (DynReified::Primitive(prim), _) => raw_of_prim(*prim, field),
            (DynReified::Vector(elem), DecodedValue::Vector(elts)) => Ok(MoveValue::Vector(
                elts.iter()
                    .map(|elt| elem.to_fields(elt))
                    .collect::<ReifyResult<_>>()?,
            )),
            (DynReified::Vector(_), other) => {
                Err(ReifyError::mismatch(self.full_type_name(), other.kind()))
            }
            (DynReified::Struct(s), _) => s.to_fields(field),
        }
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<DecodedValue> {
        match self {
            DynReified::Primitive(prim) => prim_of_json(*prim, item),
            DynReified::Vector(elem) => Ok(DecodedValue::Vector(
                json_array(item)?
                    .iter()
                    .map(|elt| elem.from_fields_with_types(elt))
                    .collect::<ReifyResult<_>>()?,
            )),
            DynReified::Struct(s) => {
                trace!("decoding {} from typed-fields", s.full_type_name());
                s.from_fields_with_types(item)
            }
        }
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<DecodedValue> {
        match self {
            DynReified::Primitive(prim) => prim_of_json(*prim, field),
            DynReified::Vector(elem) => Ok(DecodedValue::Vector(
                json_array(field)?
                    .iter()
                    .map(|elt| elem.from_json_field(elt))
                    .collect::<ReifyResult<_>>()?,
            )),
            DynReified::Struct(s) => s.from_json_field(field),
        }
    }
}

fn single_arg<'a>(name: &str, args: &'a [String]) -> ReifyResult<&'a str> {
    match args {
        [arg] => Ok(arg),
        _ => Err(ReifyError::TypeArgumentCountMismatch {
            type_name: name.to_owned(),
            expected: 1,
            actual: args.len(),
        }),
    }
}

/// Renders `value` as a JSON field of the type named by `type_str`.
///
/// Unlike [`ToJsonField`], the value is checked against the type first: a
/// value of any other type is a [`ReifyError::SchemaMismatch`].
pub fn field_to_json(type_str: &str, value: &DecodedValue) -> ReifyResult<JsonValue> {
    let (name, args) = parse_type_name(type_str)?;
    let mismatch = || {
        let actual = match value {
            DecodedValue::Struct(s) => s.full_type_name(),
            other => other.kind().to_owned(),
        };
        ReifyError::mismatch(type_str, actual)
    };
    if let Some(prim) = Primitive::from_name(&name) {
        return if value.primitive() == Some(prim) {
            Ok(value.to_json_field())
        } else {
            Err(mismatch())
        };
    }
    if name == "vector" {
        let elem = single_arg(&name, &args)?;
        return match value {
            DecodedValue::Vector(elts) => Ok(JsonValue::Array(
                elts.iter()
                    .map(|elt| field_to_json(elem, elt))
                    .collect::<ReifyResult<_>>()?,
            )),
            _ => Err(mismatch()),
        };
    }
    let head = compress_type(&name)?;
    match (head.as_str(), value) {
        (special::OPTION, DecodedValue::Option(None)) => Ok(JsonValue::Null),
        (special::OPTION, DecodedValue::Option(Some(inner))) => {
            field_to_json(single_arg(&head, &args)?, inner)
        }
        (special::STRING | special::ASCII_STRING | special::URL, DecodedValue::String(s)) => {
            Ok(JsonValue::String(s.clone()))
        }
        (special::ID | special::UID, DecodedValue::Address(addr)) => Ok(addr.to_json_field()),
        (_, DecodedValue::Struct(s)) if s.type_name() == head => {
            let matches = s.type_args().len() == args.len()
                && s.type_args()
                    .iter()
                    .zip(args.iter())
                    .all(|(have, want)| same_type(have, want));
            if matches {
                Ok(s.to_json_field())
            } else {
                Err(mismatch())
            }
        }
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loader::STD_LOADER;
    use serde_json::json;

    fn reified(type_str: &str) -> DynReified {
        STD_LOADER.reified(type_str).unwrap()
    }

    #[test]
    fn coin_binary_round_trip() {
        let r = reified("0x2::coin::Coin<0x2::sui::SUI>");
        let mut bytes = vec![0u8; 32];
        bytes[31] = 0x0c;
        bytes.extend_from_slice(&[0xe8, 0x03, 0, 0, 0, 0, 0, 0]);
        let coin = r.from_bcs(&bytes).unwrap();
        let s = coin.as_struct().unwrap();
        assert_eq!(s.type_args(), &[String::from("0x2::sui::SUI")]);
        assert_eq!(s.field("id"), Some(&DecodedValue::Address(Address::from_u8(0x0c))));
        assert_eq!(
            coin.to_json_field(),
            json!({
                "id": "0x000000000000000000000000000000000000000000000000000000000000000c",
                "balance": {"value": "1000"}
            })
        );
        assert_eq!(r.to_bcs(&coin), Ok(bytes));
    }

    #[test]
    fn special_names_have_shapes() {
        for name in [
            special::STRING,
            special::ASCII_STRING,
            special::OPTION,
            special::URL,
            special::ID,
            special::UID,
            special::BALANCE,
        ] {
            assert_ne!(Shape::of(name), Shape::Plain, "{}", name);
        }
        assert_eq!(Shape::of("0x2::coin::Coin"), Shape::Plain);
    }

    #[test]
    fn encoding_checks_type_args() {
        let mut bytes = vec![0u8; 32];
        bytes[31] = 0x0c;
        bytes.extend_from_slice(&[0xe8, 0x03, 0, 0, 0, 0, 0, 0]);
        let usdc = reified("0x2::coin::Coin<0xabc::usdc::USDC>").from_bcs(&bytes).unwrap();
        let sui = reified("0x2::coin::Coin<0x2::sui::SUI>");
        assert!(matches!(sui.to_bcs(&usdc), Err(ReifyError::SchemaMismatch { .. })));
        assert!(field_to_json(&sui.full_type_name(), &usdc).is_err());

        let balance = usdc.as_struct().unwrap().field("balance").unwrap().clone();
        let sui_balance = reified("0x2::balance::Balance<0x2::sui::SUI>");
        assert!(matches!(
            sui_balance.to_bcs(&balance),
            Err(ReifyError::SchemaMismatch { .. })
        ));
        let padded = reified(
            "0x2::balance::Balance<0x00000000000000000000000000000000000000000000000000000000000abc::usdc::USDC>",
        );
        assert_eq!(padded.to_bcs(&balance), Ok(bytes[32..].to_vec()));
    }

    #[test]
    fn option_lengths() {
        let r = reified("0x1::option::Option<u8>");
        assert_eq!(r.from_bcs(&[0x00]), Ok(DecodedValue::Option(None)));
        assert_eq!(
            r.from_bcs(&[0x01, 0x07]),
            Ok(DecodedValue::Option(Some(Box::new(DecodedValue::U8(7)))))
        );
        assert!(matches!(
            r.from_bcs(&[0x02, 0x07, 0x08]),
            Err(ReifyError::UnknownVariant(ShapeError::InvalidOptionLength(2)))
        ));
    }

    #[test]
    fn strings_in_field_position() {
        let r = reified("0x1::option::Option<0x1::string::String>");
        let val = r.from_bcs(&[0x01, 0x02, b'h', b'i']).unwrap();
        assert_eq!(val.to_json_field(), json!("hi"));
        assert_eq!(r.from_fields_with_types(&json!("hi")), Ok(val.clone()));
        assert_eq!(r.from_json_field(&json!("hi")), Ok(val.clone()));
        assert_eq!(r.to_bcs(&val), Ok(vec![0x01, 0x02, b'h', b'i']));
    }

    #[test]
    fn typed_fields_check_arguments() {
        let r = reified("0x2::balance::Balance<0x2::sui::SUI>");
        assert!(r
            .from_fields_with_types(&json!({
                "type": "0x2::balance::Balance<0x2::sui::SUI>",
                "fields": {"value": "1"}
            }))
            .is_ok());
        assert!(matches!(
            r.from_fields_with_types(&json!({
                "type": "0x2::balance::Balance<0xabc::usdc::USDC>",
                "fields": {"value": "1"}
            })),
            Err(ReifyError::SchemaMismatch { .. })
        ));
        assert_eq!(
            r.from_fields_with_types(&json!("1")).unwrap().to_json_field(),
            json!({"value": "1"})
        );
    }

    #[test]
    fn json_round_trip() {
        let r = reified("0x2::vec_map::VecMap<address, vector<u8>>");
        let val = r
            .from_json_field(&json!({
                "contents": [{"key": "0x1", "value": [1, 2]}]
            }))
            .unwrap();
        let s = val.as_struct().unwrap();
        assert_eq!(s.full_type_name(), "0x2::vec_map::VecMap<address, vector<u8>>");
        assert_eq!(r.from_json(&s.to_json()), Ok(val.clone()));
        let other = reified("0x2::vec_map::VecMap<address, vector<u16>>");
        assert!(matches!(
            other.from_json(&s.to_json()),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn textual_field_to_json() {
        let val = DecodedValue::Vector(vec![DecodedValue::U64(5)]);
        assert_eq!(field_to_json("vector<u64>", &val), Ok(json!(["5"])));
        assert!(matches!(
            field_to_json("vector<u8>", &val),
            Err(ReifyError::SchemaMismatch { .. })
        ));
        assert_eq!(
            field_to_json("0x1::option::Option<0x2::object::ID>", &DecodedValue::Option(None)),
            Ok(json!(null))
        );
        assert_eq!(
            field_to_json(
                "0x0000000000000000000000000000000000000000000000000000000000000001::string::String",
                &DecodedValue::String(String::from("x"))
            ),
            Ok(json!("x"))
        );
        let bal = reified("0x2::balance::Balance<0x2::sui::SUI>")
            .from_json_field(&json!({"value": "3"}))
            .unwrap();
        assert_eq!(
            field_to_json("0x2::balance::Balance<0x2::sui::SUI>", &bal),
            Ok(json!({"value": "3"}))
        );
        assert!(field_to_json("0x2::balance::Balance<0x3::x::Y>", &bal).is_err());
    }

    #[test]
    fn value_kind_is_checked_on_encode() {
        let r = reified("0x2::object::UID");
        assert!(matches!(
            r.to_bcs(&DecodedValue::String(String::from("0x1"))),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn parsed_object() {
        let r = reified("0x2::coin::Coin<0x2::sui::SUI>");
        let content = json!({
            "dataType": "moveObject",
            "type": "0x2::coin::Coin<0x2::sui::SUI>",
            "fields": {"id": {"id": "0x5"}, "balance": "20"}
        });
        let coin = r.from_parsed_data(&content).unwrap();
        assert_eq!(
            coin.as_struct().unwrap().field("balance").unwrap().to_json_field(),
            json!({"value": "20"})
        );
    }
}
