//! `0x1::bit_vector::BitVector`

use serde_json::Value as JsonValue;

use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::{
    expect_struct, json_field, json_struct, move_struct, prim, struct_field, vector, Reified,
    ReifyResult, StructClass, StructReified, ToJsonField, TypeArgument,
};
use crate::typetag::TypeTagResult;

pub const TYPE_NAME: &str = "0x1::bit_vector::BitVector";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitVector {
    pub length: u64,
    pub bit_field: Vec<bool>,
}

impl ToJsonField for BitVector {
    fn to_json_field(&self) -> JsonValue {
        json_struct(vec![
            ("length", self.length.to_json_field()),
            ("bit_field", self.bit_field.to_json_field()),
        ])
    }
}

impl StructClass for BitVector {
    const TYPE_NAME: &'static str = TYPE_NAME;

    fn type_args(&self) -> &[String] {
        &[]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitVectorReified;

impl Reified for BitVectorReified {
    type Field = BitVector;

    fn full_type_name(&self) -> String {
        TYPE_NAME.to_owned()
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            TYPE_NAME,
            vec![
                (String::from("length"), Layout::U64),
                (String::from("bit_field"), Layout::vector(Layout::Bool)),
            ],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<BitVector> {
        let s = expect_struct(value, &["length", "bit_field"])?;
        Ok(BitVector {
            length: prim::U64.from_fields(struct_field(s, "length")?)?,
            bit_field: vector(prim::Bool).from_fields(struct_field(s, "bit_field")?)?,
        })
    }

    fn to_fields(&self, field: &BitVector) -> ReifyResult<MoveValue> {
        Ok(move_struct(
            TYPE_NAME.to_owned(),
            vec![
                ("length", prim::U64.to_fields(&field.length)?),
                ("bit_field", vector(prim::Bool).to_fields(&field.bit_field)?),
            ],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<BitVector> {
        let view = self.check_fields_with_types(item)?;
        Ok(BitVector {
            length: prim::U64.from_fields_with_types(view.field("length")?)?,
            bit_field: vector(prim::Bool).from_fields_with_types(view.field("bit_field")?)?,
        })
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<BitVector> {
        Ok(BitVector {
            length: prim::U64.from_json_field(json_field(field, "length")?)?,
            bit_field: vector(prim::Bool).from_json_field(json_field(field, "bit_field")?)?,
        })
    }
}

impl StructReified for BitVectorReified {
    const TYPE_NAME: &'static str = TYPE_NAME;
    const NUM_TYPE_PARAMS: usize = 0;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        Vec::new()
    }
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    Ok(vec![StructDecl::new(TYPE_NAME)?
        .field("length", "u64")
        .field("bit_field", "vector<bool>")])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::{ReifyError, ShapeError};
    use serde_json::json;

    const BYTES: [u8; 12] = [3, 0, 0, 0, 0, 0, 0, 0, 3, 1, 0, 1];

    fn sample() -> BitVector {
        BitVector {
            length: 3,
            bit_field: vec![true, false, true],
        }
    }

    #[test]
    fn binary() {
        assert_eq!(BitVectorReified.from_bcs(&BYTES), Ok(sample()));
        assert_eq!(BitVectorReified.to_bcs(&sample()), Ok(BYTES.to_vec()));
    }

    #[test]
    fn truncated_at_every_cut() {
        for cut in 0..BYTES.len() {
            let err = BitVectorReified.from_bcs(&BYTES[..cut]).unwrap_err();
            assert!(err.is_truncated(), "cut at {}: {:?}", cut, err);
        }
    }

    #[test]
    fn json() {
        let json = json!({"length": "3", "bitField": [true, false, true]});
        assert_eq!(sample().to_json_field(), json);
        assert_eq!(BitVectorReified.from_json_field(&json), Ok(sample()));
        assert_eq!(
            sample().to_json(),
            json!({
                "$typeName": TYPE_NAME,
                "$typeArgs": [],
                "length": "3",
                "bitField": [true, false, true]
            })
        );
        assert_eq!(BitVectorReified.from_json(&sample().to_json()), Ok(sample()));
    }

    #[test]
    fn typed_fields() {
        let item = json!({
            "type": "0x1::bit_vector::BitVector",
            "fields": {"length": "3", "bit_field": [true, false, true]}
        });
        assert_eq!(BitVectorReified.from_fields_with_types(&item), Ok(sample()));

        let other = json!({"type": "0x1::string::String", "fields": {}});
        assert!(matches!(
            BitVectorReified.from_fields_with_types(&other),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn extra_fields_rejected() {
        let raw = move_struct(
            TYPE_NAME.to_owned(),
            vec![
                ("length", MoveValue::U64(0)),
                ("bit_field", MoveValue::Vector(Vec::new())),
                ("extra", MoveValue::Bool(true)),
            ],
        );
        assert_eq!(
            BitVectorReified.from_fields(&raw),
            Err(ReifyError::UnknownVariant(ShapeError::UnexpectedField(
                String::from("extra")
            )))
        );
    }
}
