//! `0x1::option::Option<Element>`
//!
//! On chain an option is a struct holding a vector of at most one element.
//! In field position it decodes to a Rust [`Option`]; typed-fields and JSON
//! carry `null` or the bare element.

use serde_json::Value as JsonValue;

use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::{
    expect_struct, move_struct, struct_field, Reified, ReifyResult, ShapeError, StructReified,
    TypeArgument,
};
use crate::special;
use crate::typetag::{compose_type, TypeTagResult};

/// Descriptor of `Option<T>`, built from the descriptor of `T`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionReified<R> {
    elem: R,
}

impl<R: Reified> OptionReified<R> {
    pub fn new(elem: R) -> Self {
        Self { elem }
    }

    pub fn elem(&self) -> &R {
        &self.elem
    }
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    Ok(vec![StructDecl::new(special::OPTION)?
        .data_param("Element")
        .field("vec", "vector<Element>")])
}

/// Reads the `vec` field of a raw option struct, checking its length.
pub(crate) fn option_of_raw(value: &MoveValue) -> ReifyResult<Option<&MoveValue>> {
    let s = expect_struct(value, &["vec"])?;
    let vec = struct_field(s, "vec")?;
    match vec.as_vector() {
        Some([]) => Ok(None),
        Some([elt]) => Ok(Some(elt)),
        Some(elts) => Err(ShapeError::InvalidOptionLength(elts.len()).into()),
        None => Err(ShapeError::UnexpectedKind {
            expected: "vector",
            found: vec.kind().to_owned(),
        }
        .into()),
    }
}

pub(crate) fn raw_of_option(type_name: String, elt: Option<MoveValue>) -> MoveValue {
    move_struct(type_name, vec![("vec", MoveValue::Vector(elt.into_iter().collect()))])
}

impl<R: Reified> Reified for OptionReified<R> {
    type Field = Option<R::Field>;

    fn full_type_name(&self) -> String {
        compose_type(special::OPTION, &[self.elem.full_type_name()])
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            self.full_type_name(),
            vec![(String::from("vec"), Layout::vector(self.elem.layout()))],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<Self::Field> {
        option_of_raw(value)?
            .map(|elt| self.elem.from_fields(elt))
            .transpose()
    }

    fn to_fields(&self, field: &Self::Field) -> ReifyResult<MoveValue> {
        let elt = field.as_ref().map(|val| self.elem.to_fields(val)).transpose()?;
        Ok(raw_of_option(self.full_type_name(), elt))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<Self::Field> {
        match item {
            JsonValue::Null => Ok(None),
            _ => self.elem.from_fields_with_types(item).map(Some),
        }
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<Self::Field> {
        match field {
            JsonValue::Null => Ok(None),
            _ => self.elem.from_json_field(field).map(Some),
        }
    }
}

impl<R: Reified> StructReified for OptionReified<R> {
    const TYPE_NAME: &'static str = special::OPTION;
    const NUM_TYPE_PARAMS: usize = 1;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        vec![&self.elem as &dyn TypeArgument]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::{prim, ReifyError, ToJsonField};
    use serde_json::json;

    #[test]
    fn lengths() {
        let r = OptionReified::new(prim::U8);
        assert_eq!(r.full_type_name(), "0x1::option::Option<u8>");
        assert_eq!(r.from_bcs(&[0x00]), Ok(None));
        assert_eq!(r.from_bcs(&[0x01, 0x07]), Ok(Some(7)));
        assert!(matches!(
            r.from_bcs(&[0x02, 0x07, 0x08]),
            Err(ReifyError::UnknownVariant(ShapeError::InvalidOptionLength(2)))
        ));
    }

    #[test]
    fn round_trips() {
        let r = OptionReified::new(prim::U64);
        let bytes = [0x01, 0x2a, 0, 0, 0, 0, 0, 0, 0];
        let val = r.from_bcs(&bytes).unwrap();
        assert_eq!(r.to_bcs(&val), Ok(bytes.to_vec()));
        assert_eq!(val.to_json_field(), json!("42"));
        assert_eq!(r.from_json_field(&json!("42")), Ok(Some(42)));
        assert_eq!(r.from_json_field(&json!(null)), Ok(None));
        assert_eq!(r.from_fields_with_types(&json!(null)), Ok(None));
        assert_eq!(r.to_bcs(&None), Ok(vec![0x00]));
    }

    #[test]
    fn declaration_has_one_data_param() {
        let decl = declarations().unwrap().remove(0);
        assert_eq!(decl.num_type_params(), 1);
        assert_eq!(decl.fields()[0].type_template, "vector<Element>");
    }

    #[test]
    fn type_args() {
        let r = OptionReified::new(prim::Address);
        assert_eq!(r.type_args(), vec![String::from("address")]);
        assert!(OptionReified::<prim::Address>::is_type("0x1::option::Option<u8>"));
    }
}
