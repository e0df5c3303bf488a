//! `0x2::object::ID` and `0x2::object::UID`
//!
//! `ID` wraps an address under `bytes`; `UID` wraps an `ID` under `id`. Both
//! decode to a bare [`Address`] in field position. In typed-fields an `ID`
//! is a plain address string and a `UID` is `{"id": <address>}`.

use serde_json::Value as JsonValue;

use crate::address::Address;
use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::json::{json_address, json_key};
use crate::reified::{
    expect_struct, move_struct, struct_field, Reified, ReifyResult, ShapeError, StructReified,
    TypeArgument,
};
use crate::special;
use crate::typetag::TypeTagResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IdReified;

impl Reified for IdReified {
    type Field = Address;

    fn full_type_name(&self) -> String {
        special::ID.to_owned()
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            special::ID,
            vec![(String::from("bytes"), Layout::Address)],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<Address> {
        let s = expect_struct(value, &["bytes"])?;
        match struct_field(s, "bytes")? {
            MoveValue::Address(addr) => Ok(*addr),
            other => Err(ShapeError::UnexpectedKind {
                expected: "address",
                found: other.kind().to_owned(),
            }
            .into()),
        }
    }

    fn to_fields(&self, field: &Address) -> ReifyResult<MoveValue> {
        Ok(move_struct(
            special::ID.to_owned(),
            vec![("bytes", MoveValue::Address(*field))],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<Address> {
        json_address(item)
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<Address> {
        json_address(field)
    }
}

impl StructReified for IdReified {
    const TYPE_NAME: &'static str = special::ID;
    const NUM_TYPE_PARAMS: usize = 0;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UidReified;

impl Reified for UidReified {
    type Field = Address;

    fn full_type_name(&self) -> String {
        special::UID.to_owned()
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            special::UID,
            vec![(String::from("id"), IdReified.layout())],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<Address> {
        let s = expect_struct(value, &["id"])?;
        IdReified.from_fields(struct_field(s, "id")?)
    }

    fn to_fields(&self, field: &Address) -> ReifyResult<MoveValue> {
        Ok(move_struct(
            special::UID.to_owned(),
            vec![("id", IdReified.to_fields(field)?)],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<Address> {
        json_address(json_key(item, "id")?)
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<Address> {
        json_address(field)
    }
}

impl StructReified for UidReified {
    const TYPE_NAME: &'static str = special::UID;
    const NUM_TYPE_PARAMS: usize = 0;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        Vec::new()
    }
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    Ok(vec![
        StructDecl::new(special::ID)?.field("bytes", "address"),
        StructDecl::new(special::UID)?.field("id", special::ID),
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::ToJsonField;
    use serde_json::json;

    #[test]
    fn uid_forms() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x05;
        let id = UidReified.from_bcs(&bytes).unwrap();
        assert_eq!(id, Address::from_u8(5));
        assert_eq!(UidReified.to_bcs(&id), Ok(bytes.to_vec()));

        let long = id.to_string();
        assert_eq!(id.to_json_field(), json!(long));
        assert_eq!(UidReified.from_json_field(&json!(long)), Ok(id));
        assert_eq!(UidReified.from_fields_with_types(&json!({ "id": "0x5" })), Ok(id));
        assert!(UidReified.from_fields_with_types(&json!("0x5")).is_err());
    }

    #[test]
    fn id_forms() {
        assert_eq!(
            IdReified.from_fields_with_types(&json!("0x5")),
            Ok(Address::from_u8(5))
        );
        assert!(IdReified.from_bcs(&[0u8; 31]).unwrap_err().is_truncated());
    }
}
