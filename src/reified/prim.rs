//! Descriptors of the scalar types
//!
//! Each is a unit struct named after the Move type it describes; the type
//! name is the descriptor's entire identity.

use serde_json::Value as JsonValue;

use super::error::{ReifyResult, ShapeError};
use super::json::{json_address, json_bool, json_small_uint, json_wide_uint};
use super::Reified;
use crate::address::Address as AccountAddress;
use crate::layout::{Layout, MoveValue};
use crate::typetag::Primitive;
use crate::uint::U256 as BigU256;

fn wrong_kind(expected: &'static str, found: &MoveValue) -> ShapeError {
    ShapeError::UnexpectedKind {
        expected,
        found: found.kind().to_owned(),
    }
}

macro_rules! reified_prim {
    ( $( $name:ident : $field:ty => $prim:ident, $read:expr ; )+ ) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl $name {
                pub const PRIMITIVE: Primitive = Primitive::$prim;
            }

            impl Reified for $name {
                type Field = $field;

                fn full_type_name(&self) -> String {
                    Primitive::$prim.name().to_owned()
                }

                fn layout(&self) -> Layout {
                    Layout::$prim
                }

                fn from_fields(&self, value: &MoveValue) -> ReifyResult<$field> {
                    match value {
                        MoveValue::$prim(val) => Ok(val.clone()),
                        other => Err(wrong_kind(Primitive::$prim.name(), other).into()),
                    }
                }

                fn to_fields(&self, field: &$field) -> ReifyResult<MoveValue> {
                    Ok(MoveValue::$prim(field.clone()))
                }

                fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<$field> {
                    $read(item)
                }

                fn from_json_field(&self, field: &JsonValue) -> ReifyResult<$field> {
                    $read(field)
                }
            }
        )+
    };
}

reified_prim! {
    Bool: bool => Bool, json_bool;
    U8: u8 => U8, |v| json_small_uint::<u8>(v, "u8");
    U16: u16 => U16, |v| json_small_uint::<u16>(v, "u16");
    U32: u32 => U32, |v| json_small_uint::<u32>(v, "u32");
    U64: u64 => U64, |v| json_wide_uint::<u64>(v, "u64");
    U128: u128 => U128, |v| json_wide_uint::<u128>(v, "u128");
    U256: BigU256 => U256, |v| json_wide_uint::<BigU256>(v, "u256");
    Address: AccountAddress => Address, json_address;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::error::ReifyError;
    use crate::reified::ToJsonField;
    use serde_json::json;

    #[test]
    fn wide_integers_at_max() {
        let bytes = [0xffu8; 8];
        let max = U64.from_bcs(&bytes).unwrap();
        assert_eq!(max.to_json_field(), json!("18446744073709551615"));
        assert_eq!(U64.to_bcs(&max), Ok(bytes.to_vec()));

        let max = U128.from_bcs(&[0xff; 16]).unwrap();
        assert_eq!(max.to_json_field(), json!("340282366920938463463374607431768211455"));

        let max = U256.from_bcs(&[0xff; 32]).unwrap();
        assert_eq!(
            max.to_json_field(),
            json!("115792089237316195423570985008687907853269984665640564039457584007913129639935")
        );
        assert_eq!(U256.from_json_field(&max.to_json_field()), Ok(max));
    }

    #[test]
    fn kinds_are_checked() {
        assert!(matches!(
            U8.from_fields(&MoveValue::U16(1)),
            Err(ReifyError::UnknownVariant(ShapeError::UnexpectedKind { .. }))
        ));
        assert!(Bool.from_json_field(&json!(1)).is_err());
        assert_eq!(U16.from_fields_with_types(&json!(65535)), Ok(65535));
    }

    #[test]
    fn address_forms() {
        let addr = Address.from_json_field(&json!("0x2")).unwrap();
        assert_eq!(addr, AccountAddress::from_u8(2));
        assert_eq!(
            addr.to_json_field(),
            json!("0x0000000000000000000000000000000000000000000000000000000000000002")
        );
        assert!(Address.from_bcs(&[0u8; 31]).unwrap_err().is_truncated());
    }
}
