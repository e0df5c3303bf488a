//! `0x2::coin::Coin<phantom T>`

use serde_json::Value as JsonValue;

use super::balance::{Balance, BalanceReified};
use super::object::UidReified;
use crate::address::Address;
use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::{
    expect_struct, json_field, json_struct, move_struct, struct_field, PhantomReified, Reified,
    ReifyResult, StructClass, StructReified, ToJsonField, TypeArgument,
};
use crate::special;
use crate::typetag::{compose_type, TypeTagResult};

pub const TYPE_NAME: &str = "0x2::coin::Coin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    type_args: Vec<String>,
    pub id: Address,
    pub balance: Balance,
}

impl Coin {
    pub fn new(currency: impl Into<String>, id: Address, value: u64) -> Self {
        let currency = currency.into();
        Self {
            balance: Balance::new(currency.clone(), value),
            type_args: vec![currency],
            id,
        }
    }
}

impl ToJsonField for Coin {
    fn to_json_field(&self) -> JsonValue {
        json_struct(vec![
            ("id", self.id.to_json_field()),
            ("balance", self.balance.to_json_field()),
        ])
    }
}

impl StructClass for Coin {
    const TYPE_NAME: &'static str = TYPE_NAME;

    fn type_args(&self) -> &[String] {
        &self.type_args
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinReified {
    currency: PhantomReified,
}

impl CoinReified {
    pub fn new(currency: PhantomReified) -> Self {
        Self { currency }
    }

    fn balance(&self) -> BalanceReified {
        BalanceReified::new(self.currency.clone())
    }

    fn build(&self, id: Address, balance: Balance) -> Coin {
        Coin {
            type_args: vec![self.currency.phantom_type().to_owned()],
            id,
            balance,
        }
    }
}

impl Reified for CoinReified {
    type Field = Coin;

    fn full_type_name(&self) -> String {
        compose_type(TYPE_NAME, &[self.currency.phantom_type()])
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            self.full_type_name(),
            vec![
                (String::from("id"), UidReified.layout()),
                (String::from("balance"), self.balance().layout()),
            ],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<Coin> {
        let s = expect_struct(value, &["id", "balance"])?;
        Ok(self.build(
            UidReified.from_fields(struct_field(s, "id")?)?,
            self.balance().from_fields(struct_field(s, "balance")?)?,
        ))
    }

    fn to_fields(&self, field: &Coin) -> ReifyResult<MoveValue> {
        self.check_type_args(&field.type_args)?;
        Ok(move_struct(
            self.full_type_name(),
            vec![
                ("id", UidReified.to_fields(&field.id)?),
                ("balance", self.balance().to_fields(&field.balance)?),
            ],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<Coin> {
        let view = self.check_fields_with_types(item)?;
        Ok(self.build(
            UidReified.from_fields_with_types(view.field("id")?)?,
            self.balance().from_fields_with_types(view.field("balance")?)?,
        ))
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<Coin> {
        Ok(self.build(
            UidReified.from_json_field(json_field(field, "id")?)?,
            self.balance().from_json_field(json_field(field, "balance")?)?,
        ))
    }
}

impl StructReified for CoinReified {
    const TYPE_NAME: &'static str = TYPE_NAME;
    const NUM_TYPE_PARAMS: usize = 1;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        vec![&self.currency as &dyn TypeArgument]
    }
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    Ok(vec![StructDecl::new(TYPE_NAME)?
        .phantom_param("T")
        .field("id", special::UID)
        .field("balance", "0x2::balance::Balance<T>")])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::{phantom, ReifyError};
    use serde_json::json;

    fn sui_coin() -> CoinReified {
        CoinReified::new(phantom("0x2::sui::SUI"))
    }

    fn bytes() -> Vec<u8> {
        let mut bytes = vec![0u8; 32];
        bytes[31] = 0x0c;
        bytes.extend_from_slice(&[0xe8, 0x03, 0, 0, 0, 0, 0, 0]);
        bytes
    }

    #[test]
    fn binary_round_trip() {
        let coin = sui_coin().from_bcs(&bytes()).unwrap();
        assert_eq!(coin, Coin::new("0x2::sui::SUI", Address::from_u8(0x0c), 1000));
        assert_eq!(sui_coin().to_bcs(&coin), Ok(bytes()));
        assert!(sui_coin().from_bcs(&bytes()[..39]).unwrap_err().is_truncated());
    }

    #[test]
    fn parsed_object() {
        let content = json!({
            "dataType": "moveObject",
            "type": "0x2::coin::Coin<0x2::sui::SUI>",
            "hasPublicTransfer": true,
            "fields": {
                "id": {"id": "0xc"},
                "balance": "1000"
            }
        });
        let coin = sui_coin().from_parsed_data(&content).unwrap();
        assert_eq!(coin.balance.value, 1000);
        assert_eq!(coin.id, Address::from_u8(0x0c));

        let package = json!({"dataType": "package", "disassembled": {}});
        assert!(sui_coin().from_parsed_data(&package).is_err());

        let other = json!({
            "dataType": "moveObject",
            "type": "0x2::balance::Balance<0x2::sui::SUI>",
            "fields": {"value": "1"}
        });
        assert!(matches!(
            sui_coin().from_parsed_data(&other),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn currency_is_checked_on_encode() {
        let usdc = Coin::new("0xabc::usdc::USDC", Address::from_u8(0x0c), 1000);
        assert!(matches!(
            sui_coin().to_bcs(&usdc),
            Err(ReifyError::SchemaMismatch { .. })
        ));
        let padded = Coin::new(
            "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI",
            Address::from_u8(0x0c),
            1000,
        );
        assert_eq!(sui_coin().to_bcs(&padded), Ok(bytes()));
    }

    #[test]
    fn json_round_trip() {
        let coin = Coin::new("0x2::sui::SUI", Address::from_u8(0x0c), 1000);
        let json = coin.to_json();
        assert_eq!(json["$typeArgs"], json!(["0x2::sui::SUI"]));
        assert_eq!(json["balance"], json!({"value": "1000"}));
        assert_eq!(sui_coin().from_json(&json), Ok(coin));
    }
}
