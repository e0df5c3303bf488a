//! Reified descriptors and the generic decode/encode engine
//!
//! A *reified descriptor* is a runtime value that stands in for a Move type:
//! it knows the type's full name, its binary [`Layout`], and how to turn
//! each of the three source encodings (BCS, typed-fields, JSON) into a
//! decoded value. Descriptors are built bottom-up: a `vector<T>` descriptor
//! wraps a `T` descriptor, a `Balance<T>` descriptor wraps a phantom
//! argument, and so on. They are immutable and cheap to clone.
//!
//! # Layout
//!
//! * [`Reified`] is the trait every descriptor implements, with
//!   [`StructReified`] refining it for struct shapes.
//! * [`StructClass`] is the value-side counterpart for decoded structs.
//! * [`prim`] holds the scalar descriptors, [`vector`](mod@vector) the
//!   sequence descriptor, and [`PhantomReified`] the phantom argument.
//! * The free functions at the bottom of this module (`decode_from_fields`
//!   and friends) are the engine's dispatch entry-points; they defer to the
//!   descriptor, so each shape carries its own decoding rules.

pub mod error;
pub mod fields;
pub mod json;
pub mod prim;
pub mod vector;

use std::fmt::Debug;

use log::debug;
use serde_json::{Map, Value as JsonValue};

pub use error::{ReifyError, ReifyResult, ShapeError};
pub use fields::FieldsWithTypes;
pub use json::ToJsonField;
pub use vector::VectorReified;

use crate::builder::{strict::StrictBuilder, Builder};
use crate::conv::target::Target;
use crate::conv::Encode;
use crate::layout::{Layout, MoveStruct, MoveValue};
use crate::typetag::{compose_type, compress_type, parse_type_name, same_type};
use json::{json_array, json_key, json_str};

/// Runtime descriptor of a Move type
///
/// `Field` is the in-memory type that values of the described Move type
/// decode into. Each `from_*` method decodes a value in *field position*:
/// the form a value of this type takes when it is nested inside another
/// struct, which for a handful of framework types differs from the generic
/// struct form (see [`crate::special`]).
pub trait Reified: Clone + Debug {
    type Field: Clone + Debug + PartialEq + ToJsonField;

    /// The type name with all type arguments substituted
    fn full_type_name(&self) -> String;

    /// The binary schema of values of this type
    fn layout(&self) -> Layout;

    /// Decodes from the raw value produced by parsing [`layout`](Reified::layout).
    fn from_fields(&self, value: &MoveValue) -> ReifyResult<Self::Field>;

    /// Inverse of [`from_fields`](Reified::from_fields).
    fn to_fields(&self, field: &Self::Field) -> ReifyResult<MoveValue>;

    /// Decodes from a typed-fields node.
    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<Self::Field>;

    /// Decodes from the JSON produced by [`ToJsonField`].
    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<Self::Field>;

    /// Decodes from a complete BCS buffer.
    fn from_bcs(&self, bytes: &[u8]) -> ReifyResult<Self::Field> {
        let raw = self.layout().decode(bytes)?;
        self.from_fields(&raw)
    }

    /// Encodes a value back into BCS, reproducing the bytes it was decoded from.
    fn to_bcs(&self, field: &Self::Field) -> ReifyResult<Vec<u8>> {
        let raw = self.to_fields(field)?;
        raw.check_lengths().map_err(ShapeError::TooLong)?;
        let mut buf = StrictBuilder::create();
        buf.anticipate(raw.enc_len());
        raw.write_to(&mut buf);
        Ok(buf.into_vec())
    }

    /// A phantom descriptor naming this exact instantiation
    fn phantom(&self) -> PhantomReified {
        PhantomReified::new(self.full_type_name())
    }
}

/// Anything that can be supplied as a type argument: a full descriptor, or
/// a phantom one that only carries a name.
pub trait TypeArgument: Debug {
    fn extract_type(&self) -> String;
}

impl<R: Reified> TypeArgument for R {
    fn extract_type(&self) -> String {
        self.full_type_name()
    }
}

/// Descriptor of a phantom type argument
///
/// Phantom arguments contribute no bytes to a layout and have no decode
/// behavior of their own; they only take part in the type-argument checks
/// of the typed-fields and JSON paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhantomReified {
    phantom_type: String,
}

impl PhantomReified {
    pub fn new(phantom_type: impl Into<String>) -> Self {
        Self {
            phantom_type: phantom_type.into(),
        }
    }

    #[must_use]
    pub fn phantom_type(&self) -> &str {
        &self.phantom_type
    }
}

impl TypeArgument for PhantomReified {
    fn extract_type(&self) -> String {
        self.phantom_type.clone()
    }
}

/// Descriptor of a struct shape with a fixed name and arity
pub trait StructReified: Reified {
    /// Fully-qualified name without type arguments, e.g. `0x2::balance::Balance`
    const TYPE_NAME: &'static str;
    const NUM_TYPE_PARAMS: usize;

    /// The descriptors this instantiation was built with, phantom or not
    fn reified_type_args(&self) -> Vec<&dyn TypeArgument>;

    fn type_args(&self) -> Vec<String> {
        self.reified_type_args()
            .iter()
            .map(|arg| arg.extract_type())
            .collect()
    }

    /// Checks that a value about to be encoded was decoded for, or built
    /// with, the same type arguments as this descriptor.
    fn check_type_args(&self, type_args: &[String]) -> ReifyResult<()> {
        assert_reified_type_args_match(Self::TYPE_NAME, type_args, &self.reified_type_args())
    }

    /// Returns `true` if `type_str` is an instantiation of this shape,
    /// with any type arguments.
    fn is_type(type_str: &str) -> bool {
        match compress_type(type_str).and_then(|s| parse_type_name(&s)) {
            Ok((name, args)) => name == Self::TYPE_NAME && args.len() == Self::NUM_TYPE_PARAMS,
            Err(_) => false,
        }
    }

    /// Validates the annotation of a typed-fields node against this
    /// descriptor and returns a view over its fields.
    fn check_fields_with_types<'a>(&self, item: &'a JsonValue) -> ReifyResult<FieldsWithTypes<'a>> {
        let view = FieldsWithTypes::from_json(item)?;
        if !Self::is_type(view.type_name()) {
            debug!(
                "typed-fields node of type {} rejected by {}",
                view.type_name(),
                Self::TYPE_NAME
            );
            return Err(ReifyError::mismatch(self.full_type_name(), view.type_name()));
        }
        assert_fields_with_types_args_match(&view, &self.reified_type_args())?;
        Ok(view)
    }

    /// Decodes the output of [`StructClass::to_json`], checking `$typeName`
    /// and `$typeArgs` first.
    fn from_json(&self, json: &JsonValue) -> ReifyResult<Self::Field> {
        let type_name = json_str(json_key(json, "$typeName")?)?;
        if !same_type(type_name, Self::TYPE_NAME) {
            return Err(ReifyError::mismatch(Self::TYPE_NAME, type_name));
        }
        let type_args = json_array(json_key(json, "$typeArgs")?)?
            .iter()
            .map(|arg| json_str(arg).map(str::to_owned))
            .collect::<ReifyResult<Vec<String>>>()?;
        assert_reified_type_args_match(Self::TYPE_NAME, &type_args, &self.reified_type_args())?;
        self.from_json_field(json)
    }

    /// Decodes the parsed contents of an on-chain object as returned by the
    /// node API.
    fn from_parsed_data(&self, content: &JsonValue) -> ReifyResult<Self::Field> {
        let data_type = json_str(json_key(content, "dataType")?)?;
        if data_type != "moveObject" {
            return Err(ShapeError::UnexpectedKind {
                expected: "moveObject",
                found: data_type.to_owned(),
            }
            .into());
        }
        let type_name = json_str(json_key(content, "type")?)?;
        if !Self::is_type(type_name) {
            return Err(ReifyError::mismatch(self.full_type_name(), type_name));
        }
        self.from_fields_with_types(content)
    }
}

/// Value-side view of a decoded struct
pub trait StructClass: ToJsonField {
    const TYPE_NAME: &'static str;

    fn type_args(&self) -> &[String];

    fn full_type_name(&self) -> String {
        compose_type(Self::TYPE_NAME, self.type_args())
    }

    /// Renders `{$typeName, $typeArgs, ...fields}`.
    fn to_json(&self) -> JsonValue {
        let mut obj = Map::new();
        obj.insert(
            String::from("$typeName"),
            JsonValue::String(Self::TYPE_NAME.to_owned()),
        );
        obj.insert(
            String::from("$typeArgs"),
            JsonValue::Array(
                self.type_args()
                    .iter()
                    .cloned()
                    .map(JsonValue::String)
                    .collect(),
            ),
        );
        if let JsonValue::Object(fields) = self.to_json_field() {
            obj.extend(fields);
        }
        JsonValue::Object(obj)
    }
}

/// Checks that the type arguments found in data match those a descriptor
/// was built with, comparing normalized type strings.
///
/// A different number of arguments is a mismatch like any other.
pub fn assert_reified_type_args_match(
    type_name: &str,
    type_args: &[String],
    reified_type_args: &[&dyn TypeArgument],
) -> ReifyResult<()> {
    let expected: Vec<String> = reified_type_args
        .iter()
        .map(|arg| arg.extract_type())
        .collect();
    let matches = expected.len() == type_args.len()
        && expected
            .iter()
            .zip(type_args.iter())
            .all(|(want, got)| same_type(want, got));
    if matches {
        Ok(())
    } else {
        let expected = compose_type(type_name, &expected);
        let actual = compose_type(type_name, type_args);
        debug!("type arguments rejected: expected {}, got {}", expected, actual);
        Err(ReifyError::mismatch(expected, actual))
    }
}

/// [`assert_reified_type_args_match`] against the arguments of a
/// typed-fields annotation.
pub fn assert_fields_with_types_args_match(
    item: &FieldsWithTypes<'_>,
    reified_type_args: &[&dyn TypeArgument],
) -> ReifyResult<()> {
    let (name, args) = parse_type_name(item.type_name())?;
    assert_reified_type_args_match(&name, &args, reified_type_args)
}

/// Checks that `value` is a struct declaring exactly `fields`, in any
/// order, and returns it.
pub fn expect_struct<'a>(value: &'a MoveValue, fields: &[&str]) -> ReifyResult<&'a MoveStruct> {
    let s = value.as_struct().ok_or_else(|| ShapeError::UnexpectedKind {
        expected: "struct",
        found: value.kind().to_owned(),
    })?;
    if let Some(extra) = s.unexpected_field(fields) {
        return Err(ShapeError::UnexpectedField(extra.to_owned()).into());
    }
    Ok(s)
}

/// Looks up a field of a raw struct value.
pub fn struct_field<'a>(s: &'a MoveStruct, name: &str) -> ReifyResult<&'a MoveValue> {
    s.field(name)
        .ok_or_else(|| ShapeError::MissingKey(name.to_owned()).into())
}

/// Builds a raw struct value from already-converted fields.
pub fn move_struct(type_name: String, fields: Vec<(&str, MoveValue)>) -> MoveValue {
    MoveValue::Struct(MoveStruct {
        type_name,
        fields: fields
            .into_iter()
            .map(|(name, val)| (name.to_owned(), val))
            .collect(),
    })
}

/// Renders struct fields as a JSON object keyed by camel-cased field name.
pub fn json_struct(fields: Vec<(&str, JsonValue)>) -> JsonValue {
    JsonValue::Object(
        fields
            .into_iter()
            .map(|(name, val)| (json::camel_case(name), val))
            .collect(),
    )
}

/// Looks up a struct field in a JSON object by its Move name.
pub fn json_field<'a>(v: &'a JsonValue, name: &str) -> ReifyResult<&'a JsonValue> {
    json_key(v, &json::camel_case(name))
}

/// Builds the descriptor of `vector<T>` from the descriptor of `T`.
pub fn vector<R: Reified>(elem: R) -> VectorReified<R> {
    VectorReified::new(elem)
}

/// Builds a phantom descriptor from a type string.
pub fn phantom(phantom_type: impl Into<String>) -> PhantomReified {
    PhantomReified::new(phantom_type)
}

/// Returns the full type string a type argument stands for.
pub fn extract_type<T: TypeArgument + ?Sized>(arg: &T) -> String {
    arg.extract_type()
}

/// Returns the binary layout of a descriptor.
pub fn to_bcs<R: Reified>(reified: &R) -> Layout {
    reified.layout()
}

pub fn decode_from_fields<R: Reified>(reified: &R, field: &MoveValue) -> ReifyResult<R::Field> {
    reified.from_fields(field)
}

pub fn decode_from_fields_with_types<R: Reified>(
    reified: &R,
    item: &JsonValue,
) -> ReifyResult<R::Field> {
    reified.from_fields_with_types(item)
}

pub fn decode_from_json_field<R: Reified>(reified: &R, field: &JsonValue) -> ReifyResult<R::Field> {
    reified.from_json_field(field)
}

pub fn field_to_json<T: ToJsonField + ?Sized>(field: &T) -> JsonValue {
    field.to_json_field()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::prim;
    use serde_json::json;

    #[test]
    fn type_arg_names() {
        let v = vector(vector(prim::U64));
        assert_eq!(extract_type(&v), "vector<vector<u64>>");
        assert_eq!(extract_type(&phantom("0x2::sui::SUI")), "0x2::sui::SUI");
        assert_eq!(v.phantom().phantom_type(), "vector<vector<u64>>");
    }

    #[test]
    fn arg_matching() {
        let sui = phantom("0x2::sui::SUI");
        let args: [&dyn TypeArgument; 1] = [&sui];
        let padded =
            String::from("0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI");
        assert_eq!(
            assert_reified_type_args_match("0x2::balance::Balance", &[padded], &args),
            Ok(())
        );
        assert!(matches!(
            assert_reified_type_args_match(
                "0x2::balance::Balance",
                &[String::from("0x3::x::Y")],
                &args
            ),
            Err(ReifyError::SchemaMismatch { .. })
        ));
        assert!(matches!(
            assert_reified_type_args_match("0x2::balance::Balance", &[], &args),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn dispatchers_defer_to_descriptor() {
        let r = vector(prim::U128);
        let raw = r.layout().decode(&[0x01, 0x05, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(decode_from_fields(&r, &raw), Ok(vec![5u128]));
        assert_eq!(decode_from_fields_with_types(&r, &json!(["5"])), Ok(vec![5u128]));
        assert_eq!(decode_from_json_field(&r, &json!(["5"])), Ok(vec![5u128]));
        assert_eq!(field_to_json(&vec![5u128]), json!(["5"]));
        assert_eq!(to_bcs(&r), Layout::vector(Layout::U128));
    }
}
