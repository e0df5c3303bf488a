use std::fmt::Display;

use crate::address::AddressError;

/// Reasons a type string could not be parsed
///
/// Every case is reported to the caller as a malformed type string; they
/// are kept apart only so the message can say what was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTagError {
    /// `<` and `>` do not pair up, or text follows the closing `>`
    UnbalancedBrackets(String),
    /// An argument list contains an empty entry, e.g. `Foo<u8,>` or `Foo<>`
    EmptyArgument(String),
    /// A struct name is not of the form `address::module::Name`
    InvalidName(String),
    /// The address segment of a struct name is not valid hex
    InvalidAddress(String, AddressError),
    /// A primitive was given type arguments, or `vector` was given other than one
    WrongArity { name: String, expected: usize, actual: usize },
    /// Type arguments nest deeper than
    /// [`MAX_TYPE_DEPTH`](crate::typetag::MAX_TYPE_DEPTH) levels
    TooDeep(String),
}

impl Display for TypeTagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTagError::UnbalancedBrackets(s) => {
                write!(f, "unbalanced angle brackets in type `{}`", s)
            }
            TypeTagError::EmptyArgument(s) => {
                write!(f, "empty type argument in type `{}`", s)
            }
            TypeTagError::InvalidName(s) => {
                write!(f, "`{}` is not a primitive or an `address::module::Name` type", s)
            }
            TypeTagError::InvalidAddress(s, err) => {
                write!(f, "bad address in type `{}`: {}", s, err)
            }
            TypeTagError::TooDeep(name) => {
                write!(
                    f,
                    "type arguments of `{}` nest deeper than {} levels",
                    name,
                    crate::typetag::MAX_TYPE_DEPTH
                )
            }
            TypeTagError::WrongArity {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "`{}` takes {} type arguments, found {}",
                    name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for TypeTagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TypeTagError::InvalidAddress(_, err) => Some(err),
            _ => None,
        }
    }
}

pub type TypeTagResult<T> = std::result::Result<T, TypeTagError>;
