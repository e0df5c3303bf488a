//! Borrowed view over a typed-fields node
//!
//! The node API annotates every struct value with its full type string:
//! `{"type": "0x2::coin::Coin<0x2::sui::SUI>", "fields": {...}}`. Parsed
//! object contents carry the same two keys alongside others
//! (`dataType`, `hasPublicTransfer`), which are ignored here.

use serde_json::{Map, Value as JsonValue};

use super::error::{ReifyResult, ShapeError};
use super::json::{json_key, json_object, json_str};

#[derive(Debug, Clone, Copy)]
pub struct FieldsWithTypes<'a> {
    type_name: &'a str,
    fields: &'a Map<String, JsonValue>,
}

impl<'a> FieldsWithTypes<'a> {
    /// Reads the `type` and `fields` keys of `item`.
    pub fn from_json(item: &'a JsonValue) -> ReifyResult<Self> {
        Ok(Self {
            type_name: json_str(json_key(item, "type")?)?,
            fields: json_object(json_key(item, "fields")?)?,
        })
    }

    /// The type annotation, exactly as given
    #[must_use]
    pub fn type_name(&self) -> &'a str {
        self.type_name
    }

    /// Looks up a field by its Move name.
    pub fn field(&self, name: &str) -> ReifyResult<&'a JsonValue> {
        self.fields
            .get(name)
            .ok_or_else(|| ShapeError::MissingKey(name.to_owned()).into())
    }

    #[must_use]
    pub fn fields(&self) -> &'a Map<String, JsonValue> {
        self.fields
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::error::ReifyError;
    use serde_json::json;

    #[test]
    fn reads_annotation() {
        let item = json!({
            "type": "0x2::balance::Balance<0x2::sui::SUI>",
            "fields": { "value": "10" }
        });
        let view = FieldsWithTypes::from_json(&item).unwrap();
        assert_eq!(view.type_name(), "0x2::balance::Balance<0x2::sui::SUI>");
        assert_eq!(view.field("value").unwrap(), &json!("10"));
        assert!(matches!(
            view.field("nope"),
            Err(ReifyError::UnknownVariant(ShapeError::MissingKey(_)))
        ));
    }

    #[test]
    fn needs_both_keys() {
        assert!(FieldsWithTypes::from_json(&json!({"type": "u8"})).is_err());
        assert!(FieldsWithTypes::from_json(&json!({"fields": {}})).is_err());
    }
}
