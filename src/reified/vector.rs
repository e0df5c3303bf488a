use serde_json::Value as JsonValue;

use super::error::{ReifyResult, ShapeError};
use super::json::json_array;
use super::Reified;
use crate::layout::{Layout, MoveValue};

/// Descriptor of `vector<T>`, built from the descriptor of `T`
///
/// Elements keep their order in every encoding; a vector is an array in
/// both typed-fields and JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VectorReified<R> {
    elem: R,
}

impl<R: Reified> VectorReified<R> {
    pub fn new(elem: R) -> Self {
        Self { elem }
    }

    pub fn elem(&self) -> &R {
        &self.elem
    }
}

impl<R: Reified> Reified for VectorReified<R> {
    type Field = Vec<R::Field>;

    fn full_type_name(&self) -> String {
        format!("vector<{}>", self.elem.full_type_name())
    }

    fn layout(&self) -> Layout {
        Layout::vector(self.elem.layout())
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<Self::Field> {
        let elts = value.as_vector().ok_or_else(|| ShapeError::UnexpectedKind {
            expected: "vector",
            found: value.kind().to_owned(),
        })?;
        elts.iter().map(|elt| self.elem.from_fields(elt)).collect()
    }

    fn to_fields(&self, field: &Self::Field) -> ReifyResult<MoveValue> {
        Ok(MoveValue::Vector(
            field
                .iter()
                .map(|elt| self.elem.to_fields(elt))
                .collect::<ReifyResult<Vec<MoveValue>>>()?,
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<Self::Field> {
        json_array(item)?
            .iter()
            .map(|elt| self.elem.from_fields_with_types(elt))
            .collect()
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<Self::Field> {
        json_array(field)?
            .iter()
            .map(|elt| self.elem.from_json_field(elt))
            .collect()
    }
}
