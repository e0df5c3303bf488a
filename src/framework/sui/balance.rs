//! `0x2::balance::Balance<phantom T>` and `0x2::balance::Supply<phantom T>`
//!
//! Both hold a single `u64` and are parameterized by a phantom currency
//! type, so every instantiation shares one layout. The currency takes part
//! only in the type-argument checks.
//!
//! In typed-fields a `Balance` nested in another struct arrives as its bare
//! value. The annotated `{type, fields}` form is accepted as well.

use serde_json::Value as JsonValue;

use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::{
    expect_struct, json_field, json_struct, move_struct, prim, struct_field, PhantomReified,
    Reified, ReifyResult, StructClass, StructReified, ToJsonField, TypeArgument,
};
use crate::special;
use crate::typetag::{compose_type, TypeTagResult};

pub const SUPPLY: &str = "0x2::balance::Supply";

macro_rules! phantom_value_shape {
    ( $( $(#[$meta:meta])* $value:ident, $reified:ident => $type_name:expr, bare = $bare:expr ; )+ ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq)]
            pub struct $value {
                type_args: Vec<String>,
                pub value: u64,
            }

            impl $value {
                pub fn new(currency: impl Into<String>, value: u64) -> Self {
                    Self {
                        type_args: vec![currency.into()],
                        value,
                    }
                }
            }

            impl ToJsonField for $value {
                fn to_json_field(&self) -> JsonValue {
                    json_struct(vec![("value", self.value.to_json_field())])
                }
            }

            impl StructClass for $value {
                const TYPE_NAME: &'static str = $type_name;

                fn type_args(&self) -> &[String] {
                    &self.type_args
                }
            }

            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $reified {
                currency: PhantomReified,
            }

            impl $reified {
                pub fn new(currency: PhantomReified) -> Self {
                    Self { currency }
                }

                fn build(&self, value: u64) -> $value {
                    $value::new(self.currency.phantom_type(), value)
                }
            }

            impl Reified for $reified {
                type Field = $value;

                fn full_type_name(&self) -> String {
                    compose_type($type_name, &[self.currency.phantom_type()])
                }

                fn layout(&self) -> Layout {
                    Layout::Struct(StructLayout::new(
                        self.full_type_name(),
                        vec![(String::from("value"), Layout::U64)],
                    ))
                }

                fn from_fields(&self, value: &MoveValue) -> ReifyResult<$value> {
                    let s = expect_struct(value, &["value"])?;
                    Ok(self.build(prim::U64.from_fields(struct_field(s, "value")?)?))
                }

                fn to_fields(&self, field: &$value) -> ReifyResult<MoveValue> {
                    self.check_type_args(&field.type_args)?;
                    Ok(move_struct(
                        self.full_type_name(),
                        vec![("value", prim::U64.to_fields(&field.value)?)],
                    ))
                }

                fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<$value> {
                    if $bare && !item.is_object() {
                        return Ok(self.build(prim::U64.from_fields_with_types(item)?));
                    }
                    let view = self.check_fields_with_types(item)?;
                    Ok(self.build(prim::U64.from_fields_with_types(view.field("value")?)?))
                }

                fn from_json_field(&self, field: &JsonValue) -> ReifyResult<$value> {
                    Ok(self.build(prim::U64.from_json_field(json_field(field, "value")?)?))
                }
            }

            impl StructReified for $reified {
                const TYPE_NAME: &'static str = $type_name;
                const NUM_TYPE_PARAMS: usize = 1;

                fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
                    vec![&self.currency as &dyn TypeArgument]
                }
            }
        )+
    };
}

phantom_value_shape! {
    /// An amount of the currency `T`
    Balance, BalanceReified => special::BALANCE, bare = true;
    /// The total supply of the currency `T`
    Supply, SupplyReified => SUPPLY, bare = false;
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    [special::BALANCE, SUPPLY]
        .iter()
        .map(|name| -> TypeTagResult<StructDecl> {
            Ok(StructDecl::new(name)?.phantom_param("T").field("value", "u64"))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::{phantom, ReifyError};
    use serde_json::json;

    fn sui_balance() -> BalanceReified {
        BalanceReified::new(phantom("0x2::sui::SUI"))
    }

    #[test]
    fn phantom_args_share_a_layout() {
        let other = BalanceReified::new(phantom("0xabc::usdc::USDC"));
        assert_eq!(other.from_bcs(&[0x0a, 0, 0, 0, 0, 0, 0, 0]).unwrap().value, 10);
        assert!(other.from_bcs(&[0x0a, 0, 0, 0]).unwrap_err().is_truncated());
        let bal = sui_balance().from_bcs(&[0x0a, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(bal, Balance::new("0x2::sui::SUI", 10));
        assert_eq!(bal.full_type_name(), "0x2::balance::Balance<0x2::sui::SUI>");
    }

    #[test]
    fn json_round_trip() {
        let bal = Balance::new("0x2::sui::SUI", 10);
        assert_eq!(bal.to_json_field(), json!({"value": "10"}));
        assert_eq!(
            bal.to_json(),
            json!({
                "$typeName": "0x2::balance::Balance",
                "$typeArgs": ["0x2::sui::SUI"],
                "value": "10"
            })
        );
        assert_eq!(sui_balance().from_json(&bal.to_json()), Ok(bal));
    }

    #[test]
    fn currency_is_checked_on_encode() {
        let usdc = Balance::new("0xabc::usdc::USDC", 10);
        assert!(matches!(
            sui_balance().to_bcs(&usdc),
            Err(ReifyError::SchemaMismatch { .. })
        ));
        let supply = SupplyReified::new(phantom("0x2::sui::SUI"));
        assert!(matches!(
            supply.to_fields(&Supply::new("0xabc::usdc::USDC", 10)),
            Err(ReifyError::SchemaMismatch { .. })
        ));
        assert_eq!(
            supply.to_bcs(&Supply::new("0x2::sui::SUI", 10)),
            Ok(vec![0x0a, 0, 0, 0, 0, 0, 0, 0])
        );
    }

    #[test]
    fn json_currency_is_checked() {
        let usdc = Balance::new("0xabc::usdc::USDC", 10);
        assert!(matches!(
            sui_balance().from_json(&usdc.to_json()),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn typed_fields_forms() {
        assert_eq!(
            sui_balance().from_fields_with_types(&json!("10")),
            Ok(Balance::new("0x2::sui::SUI", 10))
        );
        let annotated = json!({
            "type": "0x2::balance::Balance<0x2::sui::SUI>",
            "fields": {"value": "10"}
        });
        assert_eq!(
            sui_balance().from_fields_with_types(&annotated),
            Ok(Balance::new("0x2::sui::SUI", 10))
        );
    }

    #[test]
    fn typed_fields_currency_is_checked() {
        let annotated = json!({
            "type": "0x2::balance::Balance<0xabc::usdc::USDC>",
            "fields": {"value": "10"}
        });
        assert!(matches!(
            sui_balance().from_fields_with_types(&annotated),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn supply_is_never_bare() {
        let r = SupplyReified::new(phantom("0x2::sui::SUI"));
        assert!(r.from_fields_with_types(&json!("10")).is_err());
        assert_eq!(
            r.from_fields_with_types(&json!({
                "type": "0x2::balance::Supply<0x2::sui::SUI>",
                "fields": {"value": "7"}
            })),
            Ok(Supply::new("0x2::sui::SUI", 7))
        );
    }
}
