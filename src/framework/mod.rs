//! Statically-typed descriptors for the framework packages
//!
//! Each shape comes as a pair: a value type holding decoded data (e.g.
//! [`sui::Coin`]) and a descriptor that decodes it (e.g.
//! [`sui::CoinReified`]). Generic shapes take the descriptors of their type
//! arguments at construction, so a mis-instantiated shape does not compile.
//!
//! [`declarations`] lists the same shapes as schema metadata for the dynamic
//! loader.

pub mod move_stdlib;
pub mod sui;

use crate::dynamic::decl::StructDecl;
use crate::typetag::TypeTagResult;

/// Declarations of every framework struct this crate knows the layout of
pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    let mut decls = move_stdlib::declarations()?;
    decls.extend(sui::declarations()?);
    Ok(decls)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let decls = declarations().unwrap();
        let names: HashSet<&str> = decls.iter().map(StructDecl::type_name).collect();
        assert_eq!(names.len(), decls.len());
        assert!(names.contains("0x2::coin::Coin"));
    }
}
