//! Framework types whose field-position encodings differ from their layout
//!
//! The node API unwraps a handful of framework structs when they appear as
//! fields: strings arrive as plain strings, object identifiers as plain
//! addresses, a `UID` as `{id: <address>}`, a `Balance` as its bare value and
//! an `Option` as `null` or its bare content. The list below has to match
//! the node API version being talked to; it is not derivable from the
//! struct layouts themselves.

pub const STRING: &str = "0x1::string::String";
pub const ASCII_STRING: &str = "0x1::ascii::String";
pub const OPTION: &str = "0x1::option::Option";
pub const URL: &str = "0x2::url::Url";
pub const ID: &str = "0x2::object::ID";
pub const UID: &str = "0x2::object::UID";
pub const BALANCE: &str = "0x2::balance::Balance";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn listed_names_are_normalized() {
        for name in [STRING, ASCII_STRING, OPTION, URL, ID, UID, BALANCE] {
            assert_eq!(crate::typetag::compress_type(name).unwrap(), name);
        }
    }
}
