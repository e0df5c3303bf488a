//! `0x1::type_name::TypeName`, a type string stored on chain as ASCII

use serde_json::Value as JsonValue;

use super::string::AsciiStringReified;
use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::{
    expect_struct, json_field, json_struct, move_struct, struct_field, Reified, ReifyResult,
    StructClass, StructReified, ToJsonField, TypeArgument,
};
use crate::special;
use crate::typetag::{TypeTag, TypeTagResult};

pub const TYPE_NAME: &str = "0x1::type_name::TypeName";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeName {
    pub name: String,
}

impl TypeName {
    /// Parses the stored name, whose addresses are written without a `0x`
    /// prefix.
    pub fn as_type_tag(&self) -> TypeTagResult<TypeTag> {
        self.name.parse()
    }
}

impl ToJsonField for TypeName {
    fn to_json_field(&self) -> JsonValue {
        json_struct(vec![("name", self.name.to_json_field())])
    }
}

impl StructClass for TypeName {
    const TYPE_NAME: &'static str = TYPE_NAME;

    fn type_args(&self) -> &[String] {
        &[]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeNameReified;

impl Reified for TypeNameReified {
    type Field = TypeName;

    fn full_type_name(&self) -> String {
        TYPE_NAME.to_owned()
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            TYPE_NAME,
            vec![(String::from("name"), AsciiStringReified.layout())],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<TypeName> {
        let s = expect_struct(value, &["name"])?;
        Ok(TypeName {
            name: AsciiStringReified.from_fields(struct_field(s, "name")?)?,
        })
    }

    fn to_fields(&self, field: &TypeName) -> ReifyResult<MoveValue> {
        Ok(move_struct(
            TYPE_NAME.to_owned(),
            vec![("name", AsciiStringReified.to_fields(&field.name)?)],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<TypeName> {
        let view = self.check_fields_with_types(item)?;
        Ok(TypeName {
            name: AsciiStringReified.from_fields_with_types(view.field("name")?)?,
        })
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<TypeName> {
        Ok(TypeName {
            name: AsciiStringReified.from_json_field(json_field(field, "name")?)?,
        })
    }
}

impl StructReified for TypeNameReified {
    const TYPE_NAME: &'static str = TYPE_NAME;
    const NUM_TYPE_PARAMS: usize = 0;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        Vec::new()
    }
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    Ok(vec![StructDecl::new(TYPE_NAME)?.field("name", special::ASCII_STRING)])
}
