//! Struct declarations: the schema metadata a loader builds descriptors from
//!
//! A declaration names a struct, lists its type parameters (each marked
//! phantom or data-carrying) and its fields in declaration order. Field
//! types are templates in which the type parameters appear by name, e.g.
//! `vector<0x2::vec_map::Entry<K, V>>`.

use crate::reified::{ReifyError, ReifyResult, ShapeError};
use crate::typetag::{compose_type, compress_type, parse_type_name, TypeTagResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Carried for identity only; contributes no bytes
    Phantom,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub kind: ParamKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub type_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    type_name: String,
    type_params: Vec<TypeParam>,
    fields: Vec<FieldDecl>,
}

impl StructDecl {
    /// Starts a declaration for the struct named `type_name`.
    ///
    /// The name is normalized; malformed names are rejected.
    pub fn new(type_name: &str) -> TypeTagResult<Self> {
        Ok(Self {
            type_name: compress_type(type_name)?,
            type_params: Vec::new(),
            fields: Vec::new(),
        })
    }

    #[must_use]
    pub fn phantom_param(mut self, name: &str) -> Self {
        self.type_params.push(TypeParam {
            name: name.to_owned(),
            kind: ParamKind::Phantom,
        });
        self
    }

    #[must_use]
    pub fn data_param(mut self, name: &str) -> Self {
        self.type_params.push(TypeParam {
            name: name.to_owned(),
            kind: ParamKind::Data,
        });
        self
    }

    #[must_use]
    pub fn field(mut self, name: &str, type_template: &str) -> Self {
        self.fields.push(FieldDecl {
            name: name.to_owned(),
            type_template: type_template.to_owned(),
        });
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn type_params(&self) -> &[TypeParam] {
        &self.type_params
    }

    #[must_use]
    pub fn num_type_params(&self) -> usize {
        self.type_params.len()
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Checks that `actual` type arguments can instantiate this declaration.
    pub fn check_arity(&self, actual: usize) -> ReifyResult<()> {
        if actual == self.num_type_params() {
            Ok(())
        } else {
            Err(ReifyError::TypeArgumentCountMismatch {
                type_name: self.type_name.clone(),
                expected: self.num_type_params(),
                actual,
            })
        }
    }

    /// Checks that the declaration has at least one field.
    ///
    /// The Move compiler gives every field-less struct a `dummy_field`, so
    /// an empty declaration cannot describe on-chain data, and its layout
    /// would occupy no bytes at all.
    pub fn check_fields(&self) -> ReifyResult<()> {
        if self.fields.is_empty() {
            Err(ShapeError::NoFields(self.type_name.clone()).into())
        } else {
            Ok(())
        }
    }

    /// Substitutes `args` for the type parameters in a field's type template.
    pub fn instantiate(&self, template: &str, args: &[String]) -> ReifyResult<String> {
        self.check_arity(args.len())?;
        Ok(substitute(template, &self.type_params, args)?)
    }
}

fn substitute(template: &str, params: &[TypeParam], args: &[String]) -> TypeTagResult<String> {
    let (name, targs) = parse_type_name(template)?;
    if targs.is_empty() {
        if let Some(ix) = params.iter().position(|param| param.name == name) {
            return Ok(args[ix].clone());
        }
        return Ok(name);
    }
    let targs = targs
        .iter()
        .map(|targ| substitute(targ, params, args))
        .collect::<TypeTagResult<Vec<String>>>()?;
    Ok(compose_type(&name, &targs))
}

#[cfg(test)]
mod test {
    use super::*;

    fn vec_map() -> StructDecl {
        StructDecl::new("0x2::vec_map::VecMap")
            .unwrap()
            .data_param("K")
            .data_param("V")
            .field("contents", "vector<0x2::vec_map::Entry<K, V>>")
    }

    #[test]
    fn template_substitution() {
        let decl = vec_map();
        assert_eq!(
            decl.instantiate(
                &decl.fields()[0].type_template,
                &[String::from("u8"), String::from("vector<u16>")]
            ),
            Ok(String::from("vector<0x2::vec_map::Entry<u8, vector<u16>>>"))
        );
    }

    #[test]
    fn arity_is_checked() {
        let decl = vec_map();
        assert_eq!(
            decl.check_arity(1),
            Err(ReifyError::TypeArgumentCountMismatch {
                type_name: String::from("0x2::vec_map::VecMap"),
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn names_are_normalized() {
        let decl = StructDecl::new("0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI")
            .unwrap();
        assert_eq!(decl.type_name(), "0x2::sui::SUI");
    }

    #[test]
    fn fields_are_required() {
        let empty = StructDecl::new("0xabc::e::Empty").unwrap();
        assert_eq!(
            empty.check_fields(),
            Err(ReifyError::UnknownVariant(ShapeError::NoFields(String::from(
                "0xabc::e::Empty"
            ))))
        );
        assert_eq!(empty.field("dummy_field", "bool").check_fields(), Ok(()));
    }
}
