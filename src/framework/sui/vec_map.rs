//! `0x2::vec_map::VecMap<K, V>` and its `Entry<K, V>`
//!
//! A map stored as an insertion-ordered vector of key/value entries. Order
//! is preserved by every decode path.

use serde_json::Value as JsonValue;

use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::{
    expect_struct, json_field, json_struct, move_struct, struct_field, vector, Reified,
    ReifyResult, StructClass, StructReified, ToJsonField, TypeArgument, VectorReified,
};
use crate::typetag::{compose_type, TypeTagResult};

pub const VEC_MAP: &str = "0x2::vec_map::VecMap";
pub const ENTRY: &str = "0x2::vec_map::Entry";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    type_args: Vec<String>,
    pub key: K,
    pub value: V,
}

impl<K: ToJsonField, V: ToJsonField> ToJsonField for Entry<K, V> {
    fn to_json_field(&self) -> JsonValue {
        json_struct(vec![
            ("key", self.key.to_json_field()),
            ("value", self.value.to_json_field()),
        ])
    }
}

impl<K: ToJsonField, V: ToJsonField> StructClass for Entry<K, V> {
    const TYPE_NAME: &'static str = ENTRY;

    fn type_args(&self) -> &[String] {
        &self.type_args
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecMap<K, V> {
    type_args: Vec<String>,
    pub contents: Vec<Entry<K, V>>,
}

impl<K, V> VecMap<K, V> {
    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: PartialEq,
    {
        self.contents
            .iter()
            .find_map(|entry| (&entry.key == key).then_some(&entry.value))
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl<K: ToJsonField, V: ToJsonField> ToJsonField for VecMap<K, V> {
    fn to_json_field(&self) -> JsonValue {
        json_struct(vec![("contents", self.contents.to_json_field())])
    }
}

impl<K: ToJsonField, V: ToJsonField> StructClass for VecMap<K, V> {
    const TYPE_NAME: &'static str = VEC_MAP;

    fn type_args(&self) -> &[String] {
        &self.type_args
    }
}

/// Descriptor of `Entry<K, V>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryReified<K, V> {
    key: K,
    value: V,
}

impl<K: Reified, V: Reified> EntryReified<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    fn build(&self, key: K::Field, value: V::Field) -> Entry<K::Field, V::Field> {
        Entry {
            type_args: vec![self.key.full_type_name(), self.value.full_type_name()],
            key,
            value,
        }
    }
}

impl<K: Reified, V: Reified> Reified for EntryReified<K, V> {
    type Field = Entry<K::Field, V::Field>;

    fn full_type_name(&self) -> String {
        compose_type(
            ENTRY,
            &[self.key.full_type_name(), self.value.full_type_name()],
        )
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            self.full_type_name(),
            vec![
                (String::from("key"), self.key.layout()),
                (String::from("value"), self.value.layout()),
            ],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<Self::Field> {
        let s = expect_struct(value, &["key", "value"])?;
        Ok(self.build(
            self.key.from_fields(struct_field(s, "key")?)?,
            self.value.from_fields(struct_field(s, "value")?)?,
        ))
    }

    fn to_fields(&self, field: &Self::Field) -> ReifyResult<MoveValue> {
        self.check_type_args(&field.type_args)?;
        Ok(move_struct(
            self.full_type_name(),
            vec![
                ("key", self.key.to_fields(&field.key)?),
                ("value", self.value.to_fields(&field.value)?),
            ],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<Self::Field> {
        let view = self.check_fields_with_types(item)?;
        Ok(self.build(
            self.key.from_fields_with_types(view.field("key")?)?,
            self.value.from_fields_with_types(view.field("value")?)?,
        ))
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<Self::Field> {
        Ok(self.build(
            self.key.from_json_field(json_field(field, "key")?)?,
            self.value.from_json_field(json_field(field, "value")?)?,
        ))
    }
}

impl<K: Reified, V: Reified> StructReified for EntryReified<K, V> {
    const TYPE_NAME: &'static str = ENTRY;
    const NUM_TYPE_PARAMS: usize = 2;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        vec![&self.key as &dyn TypeArgument, &self.value]
    }
}

/// Descriptor of `VecMap<K, V>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VecMapReified<K, V> {
    contents: VectorReified<EntryReified<K, V>>,
}

impl<K: Reified, V: Reified> VecMapReified<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self {
            contents: vector(EntryReified::new(key, value)),
        }
    }

    fn entry(&self) -> &EntryReified<K, V> {
        self.contents.elem()
    }

    fn build(&self, contents: Vec<Entry<K::Field, V::Field>>) -> VecMap<K::Field, V::Field> {
        VecMap {
            type_args: self.type_args(),
            contents,
        }
    }
}

impl<K: Reified, V: Reified> Reified for VecMapReified<K, V> {
    type Field = VecMap<K::Field, V::Field>;

    fn full_type_name(&self) -> String {
        compose_type(VEC_MAP, &self.type_args())
    }

    fn layout(&self) -> Layout {
        Layout::Struct(StructLayout::new(
            self.full_type_name(),
            vec![(String::from("contents"), self.contents.layout())],
        ))
    }

    fn from_fields(&self, value: &MoveValue) -> ReifyResult<Self::Field> {
        let s = expect_struct(value, &["contents"])?;
        Ok(self.build(self.contents.from_fields(struct_field(s, "contents")?)?))
    }

    fn to_fields(&self, field: &Self::Field) -> ReifyResult<MoveValue> {
        self.check_type_args(&field.type_args)?;
        Ok(move_struct(
            self.full_type_name(),
            vec![("contents", self.contents.to_fields(&field.contents)?)],
        ))
    }

    fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<Self::Field> {
        let view = self.check_fields_with_types(item)?;
        Ok(self.build(
            self.contents
                .from_fields_with_types(view.field("contents")?)?,
        ))
    }

    fn from_json_field(&self, field: &JsonValue) -> ReifyResult<Self::Field> {
        Ok(self.build(
            self.contents
                .from_json_field(json_field(field, "contents")?)?,
        ))
    }
}

impl<K: Reified, V: Reified> StructReified for VecMapReified<K, V> {
    const TYPE_NAME: &'static str = VEC_MAP;
    const NUM_TYPE_PARAMS: usize = 2;

    fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
        vec![&self.entry().key as &dyn TypeArgument, &self.entry().value]
    }
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    Ok(vec![
        StructDecl::new(VEC_MAP)?
            .data_param("K")
            .data_param("V")
            .field("contents", "vector<0x2::vec_map::Entry<K, V>>"),
        StructDecl::new(ENTRY)?
            .data_param("K")
            .data_param("V")
            .field("key", "K")
            .field("value", "V"),
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::framework::move_stdlib::StringReified;
    use crate::reified::{prim, ReifyError};
    use serde_json::json;

    fn string_to_u64() -> VecMapReified<StringReified, prim::U64> {
        VecMapReified::new(StringReified, prim::U64)
    }

    // {"a": 1, "b": 2}
    const BYTES: [u8; 23] = [
        0x02, 0x01, b'a', 1, 0, 0, 0, 0, 0, 0, 0, 0x01, b'b', 2, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ];

    #[test]
    fn binary_round_trip() {
        let bytes = &BYTES[..21];
        let map = string_to_u64().from_bcs(bytes).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&String::from("b")), Some(&2));
        assert_eq!(map.contents[0].key, "a");
        assert_eq!(string_to_u64().to_bcs(&map), Ok(bytes.to_vec()));
        if cfg!(feature = "check_complete_parse") {
            assert!(string_to_u64().from_bcs(&BYTES).is_err());
        }
    }

    #[test]
    fn names() {
        assert_eq!(
            string_to_u64().full_type_name(),
            "0x2::vec_map::VecMap<0x1::string::String, u64>"
        );
        assert_eq!(
            string_to_u64().type_args(),
            vec![String::from("0x1::string::String"), String::from("u64")]
        );
    }

    #[test]
    fn json_keeps_order() {
        let map = string_to_u64().from_bcs(&BYTES[..21]).unwrap();
        let json = map.to_json_field();
        assert_eq!(
            json,
            json!({"contents": [{"key": "a", "value": "1"}, {"key": "b", "value": "2"}]})
        );
        assert_eq!(string_to_u64().from_json_field(&json), Ok(map.clone()));
        assert_eq!(string_to_u64().from_json(&map.to_json()), Ok(map));
    }

    #[test]
    fn typed_fields() {
        let item = json!({
            "type": "0x2::vec_map::VecMap<0x1::string::String, u64>",
            "fields": {
                "contents": [{
                    "type": "0x2::vec_map::Entry<0x1::string::String, u64>",
                    "fields": {"key": "a", "value": "1"}
                }]
            }
        });
        let map = string_to_u64().from_fields_with_types(&item).unwrap();
        assert_eq!(map.get(&String::from("a")), Some(&1));

        let wrong = json!({
            "type": "0x2::vec_map::VecMap<0x1::string::String, u8>",
            "fields": {"contents": []}
        });
        assert!(matches!(
            string_to_u64().from_fields_with_types(&wrong),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn type_args_are_checked_on_encode() {
        use crate::framework::sui::BalanceReified;
        use crate::reified::phantom;

        let usdc = VecMapReified::new(prim::U8, BalanceReified::new(phantom("0xabc::usdc::USDC")));
        let sui = VecMapReified::new(prim::U8, BalanceReified::new(phantom("0x2::sui::SUI")));
        let bytes = [0x01, 0x07, 0x0a, 0, 0, 0, 0, 0, 0, 0];
        let map = usdc.from_bcs(&bytes).unwrap();
        assert_eq!(usdc.to_bcs(&map), Ok(bytes.to_vec()));
        assert!(matches!(sui.to_bcs(&map), Err(ReifyError::SchemaMismatch { .. })));
        assert!(matches!(
            sui.entry().to_fields(&map.contents[0]),
            Err(ReifyError::SchemaMismatch { .. })
        ));
    }
}
