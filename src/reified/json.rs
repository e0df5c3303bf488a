//! Conversions between decoded values and `serde_json` values
//!
//! Encoding follows one rule for every shape: integers of 64 bits and wider
//! become decimal strings, narrower integers and booleans stay native,
//! addresses become `0x`-prefixed hex, and string-like shapes become plain
//! strings. Byte vectors that are not string-like stay arrays of numbers.
//!
//! The `json_*` helpers read the same forms back, reporting anything else
//! as a [`ShapeError`].

use std::str::FromStr;

use serde_json::{Map, Value as JsonValue};

use super::error::{ReifyResult, ShapeError};
use crate::address::Address;
use crate::error::{Bounded, BoundsError};
use crate::uint::U256;

/// Values that can render themselves as a JSON field
pub trait ToJsonField {
    fn to_json_field(&self) -> JsonValue;
}

impl ToJsonField for bool {
    fn to_json_field(&self) -> JsonValue {
        JsonValue::Bool(*self)
    }
}

macro_rules! impl_native_json {
    ( $( $t:ty ),* ) => {
        $(
            impl ToJsonField for $t {
                fn to_json_field(&self) -> JsonValue {
                    JsonValue::from(*self)
                }
            }
        )*
    };
}

macro_rules! impl_string_json {
    ( $( $t:ty ),* ) => {
        $(
            impl ToJsonField for $t {
                fn to_json_field(&self) -> JsonValue {
                    JsonValue::String(self.to_string())
                }
            }
        )*
    };
}

impl_native_json!(u8, u16, u32);
impl_string_json!(u64, u128, U256, Address, String);

impl<T: ToJsonField> ToJsonField for Vec<T> {
    fn to_json_field(&self) -> JsonValue {
        JsonValue::Array(self.iter().map(ToJsonField::to_json_field).collect())
    }
}

impl<T: ToJsonField> ToJsonField for Option<T> {
    fn to_json_field(&self) -> JsonValue {
        match self {
            Some(val) => val.to_json_field(),
            None => JsonValue::Null,
        }
    }
}

impl<T: ToJsonField + ?Sized> ToJsonField for Box<T> {
    fn to_json_field(&self) -> JsonValue {
        self.as_ref().to_json_field()
    }
}

/// Name of the JSON kind of `v`, for error messages
#[must_use]
pub fn json_kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn unexpected(expected: &'static str, found: &JsonValue) -> ShapeError {
    ShapeError::UnexpectedKind {
        expected,
        found: json_kind(found).to_owned(),
    }
}

pub fn json_object(v: &JsonValue) -> ReifyResult<&Map<String, JsonValue>> {
    v.as_object().ok_or_else(|| unexpected("object", v).into())
}

/// Looks up `key` in `v`, which must be an object.
pub fn json_key<'a>(v: &'a JsonValue, key: &str) -> ReifyResult<&'a JsonValue> {
    json_object(v)?
        .get(key)
        .ok_or_else(|| ShapeError::MissingKey(key.to_owned()).into())
}

pub fn json_array(v: &JsonValue) -> ReifyResult<&Vec<JsonValue>> {
    v.as_array().ok_or_else(|| unexpected("array", v).into())
}

pub fn json_str(v: &JsonValue) -> ReifyResult<&str> {
    v.as_str().ok_or_else(|| unexpected("string", v).into())
}

pub fn json_bool(v: &JsonValue) -> ReifyResult<bool> {
    v.as_bool().ok_or_else(|| unexpected("boolean", v).into())
}

/// Reads an integer narrower than 64 bits, which must be a native number.
pub fn json_small_uint<T>(v: &JsonValue, target: &'static str) -> ReifyResult<T>
where
    T: TryFrom<u128> + Into<u128> + Bounded,
{
    let n = v.as_u64().ok_or_else(|| match v {
        JsonValue::Number(n) => ShapeError::InvalidInteger {
            repr: n.to_string(),
            target,
        },
        _ => unexpected("number", v),
    })?;
    BoundsError::<u128>::restrict::<T>(u128::from(n)).map_err(|_| {
        ShapeError::InvalidInteger {
            repr: n.to_string(),
            target,
        }
        .into()
    })
}

/// Reads an integer of 64 bits or wider, which travels as a decimal string.
///
/// Native JSON numbers are also accepted when the `lenient_json_numbers`
/// feature is enabled.
pub fn json_wide_uint<T: FromStr>(v: &JsonValue, target: &'static str) -> ReifyResult<T> {
    let repr: String = match v {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) if cfg!(feature = "lenient_json_numbers") => n.to_string(),
        _ => return Err(unexpected("decimal string", v).into()),
    };
    repr.parse::<T>()
        .map_err(|_| ShapeError::InvalidInteger { repr, target }.into())
}

pub fn json_address(v: &JsonValue) -> ReifyResult<Address> {
    let s = json_str(v)?;
    s.parse::<Address>()
        .map_err(|_| ShapeError::InvalidAddress(s.to_owned()).into())
}

/// Reads a string-like field: either a plain string, or an object holding
/// the raw UTF-8 bytes under `bytes`.
pub fn json_string_like(v: &JsonValue) -> ReifyResult<String> {
    match v {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Object(_) => {
            let raw = json_array(json_key(v, "bytes")?)?
                .iter()
                .map(|b| json_small_uint::<u8>(b, "u8"))
                .collect::<ReifyResult<Vec<u8>>>()?;
            String::from_utf8(raw).map_err(|err| ShapeError::InvalidString(err.to_string()).into())
        }
        _ => Err(unexpected("string", v).into()),
    }
}

/// Converts a Move field name to the key it is rendered under in JSON.
///
/// ```
/// # use reified::reified::json::camel_case;
/// assert_eq!(camel_case("bit_field"), "bitField");
/// assert_eq!(camel_case("value"), "value");
/// ```
#[must_use]
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' && !out.is_empty() {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
