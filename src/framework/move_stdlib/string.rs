//! `0x1::string::String` and `0x1::ascii::String`
//!
//! Both are structs around a `vector<u8>` named `bytes`, but in field
//! position they decode straight to a Rust [`String`].

use serde_json::Value as JsonValue;

use crate::dynamic::decl::StructDecl;
use crate::layout::{Layout, MoveValue, StructLayout};
use crate::reified::json::{json_str, json_string_like};
use crate::reified::{
    expect_struct, move_struct, struct_field, Reified, ReifyResult, ShapeError, StructReified,
    TypeArgument,
};
use crate::special;
use crate::typetag::TypeTagResult;

fn string_layout(type_name: &str) -> Layout {
    Layout::Struct(StructLayout::new(
        type_name,
        vec![(String::from("bytes"), Layout::vector(Layout::U8))],
    ))
}

fn check_ascii(s: String, ascii: bool) -> ReifyResult<String> {
    if ascii && !s.is_ascii() {
        return Err(ShapeError::InvalidString(format!("`{}` is not ASCII", s)).into());
    }
    Ok(s)
}

/// Reads the `bytes` field of a raw string struct.
pub(crate) fn string_of_raw(value: &MoveValue, ascii: bool) -> ReifyResult<String> {
    let s = expect_struct(value, &["bytes"])?;
    let bytes = struct_field(s, "bytes")?;
    let raw = bytes.as_bytes().ok_or_else(|| ShapeError::UnexpectedKind {
        expected: "vector<u8>",
        found: bytes.kind().to_owned(),
    })?;
    let s = String::from_utf8(raw).map_err(|err| ShapeError::InvalidString(err.to_string()))?;
    check_ascii(s, ascii)
}

pub(crate) fn raw_of_string(type_name: &str, s: &str) -> MoveValue {
    move_struct(type_name.to_owned(), vec![("bytes", MoveValue::bytes(s.as_bytes()))])
}

macro_rules! string_shape {
    ( $( $(#[$meta:meta])* $name:ident => $type_name:expr, ascii = $ascii:expr ; )+ ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl Reified for $name {
                type Field = String;

                fn full_type_name(&self) -> String {
                    $type_name.to_owned()
                }

                fn layout(&self) -> Layout {
                    string_layout($type_name)
                }

                fn from_fields(&self, value: &MoveValue) -> ReifyResult<String> {
                    string_of_raw(value, $ascii)
                }

                fn to_fields(&self, field: &String) -> ReifyResult<MoveValue> {
                    check_ascii(field.clone(), $ascii)?;
                    Ok(raw_of_string($type_name, field))
                }

                fn from_fields_with_types(&self, item: &JsonValue) -> ReifyResult<String> {
                    check_ascii(json_string_like(item)?, $ascii)
                }

                fn from_json_field(&self, field: &JsonValue) -> ReifyResult<String> {
                    check_ascii(json_str(field)?.to_owned(), $ascii)
                }
            }

            impl StructReified for $name {
                const TYPE_NAME: &'static str = $type_name;
                const NUM_TYPE_PARAMS: usize = 0;

                fn reified_type_args(&self) -> Vec<&dyn TypeArgument> {
                    Vec::new()
                }
            }
        )+
    };
}

string_shape! {
    /// Descriptor of `0x1::string::String`
    StringReified => special::STRING, ascii = false;
    /// Descriptor of `0x1::ascii::String`
    AsciiStringReified => special::ASCII_STRING, ascii = true;
}

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    [special::STRING, special::ASCII_STRING]
        .iter()
        .map(|name| -> TypeTagResult<StructDecl> {
            Ok(StructDecl::new(name)?.field("bytes", "vector<u8>"))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reified::{ReifyError, ToJsonField};
    use serde_json::json;

    #[test]
    fn utf8_round_trip() {
        let bytes = [0x03, 0xe2, 0x82, 0xac];
        let s = StringReified.from_bcs(&bytes).unwrap();
        assert_eq!(s, "\u{20ac}");
        assert_eq!(StringReified.to_bcs(&s), Ok(bytes.to_vec()));
        assert_eq!(s.to_json_field(), json!("\u{20ac}"));
        assert_eq!(StringReified.from_json_field(&json!("\u{20ac}")), Ok(s));
    }

    #[test]
    fn ascii_is_enforced() {
        assert!(matches!(
            AsciiStringReified.from_bcs(&[0x03, 0xe2, 0x82, 0xac]),
            Err(ReifyError::UnknownVariant(ShapeError::InvalidString(_)))
        ));
        assert_eq!(
            AsciiStringReified.from_bcs(&[0x02, b'h', b'i']),
            Ok(String::from("hi"))
        );
        assert!(AsciiStringReified.to_bcs(&String::from("\u{e9}")).is_err());
    }

    #[test]
    fn typed_fields_forms() {
        assert_eq!(
            StringReified.from_fields_with_types(&json!("hi")),
            Ok(String::from("hi"))
        );
        assert_eq!(
            StringReified.from_fields_with_types(&json!({"bytes": [104, 105]})),
            Ok(String::from("hi"))
        );
    }

    #[test]
    fn invalid_utf8() {
        assert!(matches!(
            StringReified.from_bcs(&[0x01, 0xff]),
            Err(ReifyError::UnknownVariant(ShapeError::InvalidString(_)))
        ));
    }

    #[test]
    fn identity() {
        assert!(StringReified::is_type("0x0000000000000000000000000000000000000000000000000000000000000001::string::String"));
        assert!(!StringReified::is_type("0x1::ascii::String"));
        assert_eq!(declarations().unwrap()[0].type_name(), special::STRING);
    }
}
