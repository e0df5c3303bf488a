//! `0x2::url::Url`, an ASCII string under `url`

use serde_json::Value as JsonValue;

use crate::dynamic::decl::StructDecl;
use crate::framework::move_stdlib::AsciiStringReified;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::{
    expect_struct, move_struct, struct_field, Reified, ReifyResult, StructReified, TypeArgument,
};
use crate::special;
use crate::typetag::TypeTagResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UrlReified;

impl Reified for UrlReified {
    type Field = String;

    fn full_type_name(&self) -> String {
        special::URL.to_owned()
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            special::URL,
            vec![(String::from("url"), AsciiStringReified.layout())],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<String> {
        let s = expect_struct(value, &["url"])?;
        AsciiStringReified.from_fields(struct_field(s, "url")?)
    }

    fn to_fields(&self, field: &String) -> ReifyResult<MoveValue> {
        Ok(move_struct(
            special::URL.to_owned(),
            vec![("url", AsciiStringReified.to_fields(field)?)],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<String> {
        AsciiStringReified.from_fields_with_types(item)
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<String> {
        AsciiStringReified.from_json_field(field)
    }
}

impl StructReified for UrlReified {
    const TYPE_NAME: &'static str = special::URL;
    const NUM_TYPE_PARAMS: usize = 0;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        Vec::new()
    }
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    Ok(vec![StructDecl::new(special::URL)?.field("url", special::ASCII_STRING)])
}
