//! Error taxonomy of the reification engine
//!
//! Every decode path (binary, typed-fields, JSON) reports failure as a
//! [`ReifyError`]. None of them are transient: each says that the data is
//! not of the type the caller expected, so nothing in the crate retries.

use std::fmt::Display;

use crate::conv::DecodeError;
use crate::error::LengthError;
use crate::parse::error::ParseError;
use crate::typetag::TypeTagError;

/// Ways a typed-fields or JSON payload can fail to have the shape its
/// descriptor calls for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// An object is missing a key the shape requires
    MissingKey(String),
    /// A value of one JSON or binary kind was found where another was expected
    UnexpectedKind {
        expected: &'static str,
        found: String,
    },
    /// A number or decimal string does not fit the integer type it is meant for
    InvalidInteger { repr: String, target: &'static str },
    /// A string is not a valid hex address
    InvalidAddress(String),
    /// A string-like field did not hold valid UTF-8 (or ASCII, for `ascii::String`)
    InvalidString(String),
    /// An `Option` was encoded as a vector of other than zero or one elements
    InvalidOptionLength(usize),
    /// A struct carried a field its declaration does not have
    UnexpectedField(String),
    /// A struct declaration has no fields; Move structs always have one
    NoFields(String),
    /// A vector is too long for its length to be encoded
    TooLong(LengthError),
}

impl Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeError::MissingKey(key) => write!(f, "missing key `{}`", key),
            ShapeError::UnexpectedKind { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            ShapeError::InvalidInteger { repr, target } => {
                write!(f, "`{}` is not a valid {}", repr, target)
            }
            ShapeError::InvalidAddress(s) => write!(f, "`{}` is not a valid address", s),
            ShapeError::InvalidString(why) => write!(f, "invalid string contents: {}", why),
            ShapeError::InvalidOptionLength(n) => {
                write!(f, "option encoded as a vector of {} elements", n)
            }
            ShapeError::UnexpectedField(name) => write!(f, "unexpected field `{}`", name),
            ShapeError::NoFields(name) => write!(f, "struct `{}` declares no fields", name),
            ShapeError::TooLong(err) => write!(f, "cannot encode sequence: {}", err),
        }
    }
}

impl std::error::Error for ShapeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReifyError {
    /// A type string could not be parsed
    MalformedTypeString(TypeTagError),
    /// A generic type was instantiated with the wrong number of type arguments
    TypeArgumentCountMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },
    /// A value's type annotation does not match the descriptor it is decoded with
    SchemaMismatch { expected: String, actual: String },
    /// The binary payload could not be parsed, including truncation
    Decode(DecodeError),
    /// A typed-fields or JSON payload has the wrong shape
    UnknownVariant(ShapeError),
    /// No declaration is registered under the type name
    UnknownType(String),
}

impl ReifyError {
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        ReifyError::SchemaMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns `true` if the binary payload was shorter than its layout.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, ReifyError::Decode(err) if err.is_truncated())
    }
}

impl Display for ReifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReifyError::MalformedTypeString(err) => write!(f, "malformed type string: {}", err),
            ReifyError::TypeArgumentCountMismatch {
                type_name,
                expected,
                actual,
            } => write!(
                f,
                "type {} expects {} type arguments, but got {}",
                type_name, expected, actual
            ),
            ReifyError::SchemaMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {}, got {}", expected, actual)
            }
            ReifyError::Decode(err) => write!(f, "binary decode failed: {}", err),
            ReifyError::UnknownVariant(err) => write!(f, "unexpected payload shape: {}", err),
            ReifyError::UnknownType(name) => write!(f, "unknown type {}", name),
        }
    }
}

impl std::error::Error for ReifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReifyError::MalformedTypeString(err) => Some(err),
            ReifyError::Decode(err) => Some(err),
            ReifyError::UnknownVariant(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TypeTagError> for ReifyError {
    fn from(err: TypeTagError) -> Self {
        Self::MalformedTypeString(err)
    }
}

impl From<DecodeError> for ReifyError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<ParseError> for ReifyError {
    fn from(err: ParseError) -> Self {
        Self::Decode(DecodeError::Parse(err))
    }
}

impl From<ShapeError> for ReifyError {
    fn from(err: ShapeError) -> Self {
        Self::UnknownVariant(err)
    }
}

pub type ReifyResult<T> = std::result::Result<T, ReifyError>;
