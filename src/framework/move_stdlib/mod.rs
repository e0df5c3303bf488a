//! Shapes of the Move standard library, published at `0x1`

pub mod bit_vector;
pub mod option;
pub mod string;
pub mod type_name;

pub use bit_vector::{BitVector, BitVectorReified};
pub use option::OptionReified;
pub use string::{AsciiStringReified, StringReified};
pub use type_name::{TypeName, TypeNameReified};

use crate::dynamic::decl::StructDecl;
use crate::typetag::TypeTagResult;

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    let mut decls = string::declarations()?;
    decls.extend(option::declarations()?);
    decls.extend(bit_vector::declarations()?);
    decls.extend(type_name::declarations()?);
    Ok(decls)
}
