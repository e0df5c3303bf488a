//! `0x2::sui::SUI`, the one-time witness naming the native currency

use serde_json::Value as JsonValue;

use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::{
    expect_struct, json_field, json_struct, move_struct, prim, struct_field, Reified, ReifyResult,
    StructClass, StructReified, ToJsonField, TypeArgument,
};
use crate::typetag::TypeTagResult;

pub const TYPE_NAME: &str = "0x2::sui::SUI";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::upper_case_acronyms)]
pub struct SUI {
    pub dummy_field: bool,
}

impl ToJsonField for SUI {
    fn to_json_field(&self) -> JsonValue {
        json_struct(vec![("dummy_field", self.dummy_field.to_json_field())])
    }
}

impl StructClass for SUI {
    const TYPE_NAME: &'static str = TYPE_NAME;

    fn type_args(&self) -> &[String] {
        &[]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SuiReified;

impl Reified for SuiReified {
    type Field = SUI;

    fn full_type_name(&self) -> String {
        TYPE_NAME.to_owned()
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            TYPE_NAME,
            vec![(String::from("dummy_field"), Layout::Bool)],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<SUI> {
        let s = expect_struct(value, &["dummy_field"])?;
        Ok(SUI {
            dummy_field: prim::Bool.from_fields(struct_field(s, "dummy_field")?)?,
        })
    }

    fn to_fields(&self, field: &SUI) -> ReifyResult<MoveValue> {
        Ok(move_struct(
            TYPE_NAME.to_owned(),
            vec![("dummy_field", MoveValue::Bool(field.dummy_field))],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<SUI> {
        let view = self.check_fields_with_types(item)?;
        Ok(SUI {
            dummy_field: prim::Bool.from_fields_with_types(view.field("dummy_field")?)?,
        })
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<SUI> {
        Ok(SUI {
            dummy_field: prim::Bool.from_json_field(json_field(field, "dummy_field")?)?,
        })
    }
}

impl StructReified for SuiReified {
    const TYPE_NAME: &'static str = TYPE_NAME;
    const NUM_TYPE_PARAMS: usize = 0;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        Vec::new()
    }
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    Ok(vec![StructDecl::new(TYPE_NAME)?.field("dummy_field", "bool")])
}
