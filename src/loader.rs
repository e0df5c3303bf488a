//! Registry of struct declarations, and construction of runtime descriptors
//! from type strings
//!
//! [`StructClassLoader::reified`] takes a type string such as
//! `0x2::coin::Coin<0x2::sui::SUI>`, normalizes it, and builds the matching
//! [`DynReified`] recursively: primitives directly, `vector<T>` around the
//! descriptor of `T`, and structs from their registered declaration. Phantom
//! arguments are kept as names and need not be registered themselves.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, trace};

use crate::dynamic::{DynReified, DynStruct, ParamKind, StructDecl};
use crate::framework;
use crate::reified::{PhantomReified, ReifyError, ReifyResult};
use crate::typetag::{
    compress_type, parse_type_name, Primitive, TypeTagError, TypeTagResult, MAX_TYPE_DEPTH,
};

#[derive(Debug, Clone, Default)]
pub struct StructClassLoader {
    decls: HashMap<String, Arc<StructDecl>>,
}

lazy_static! {
    /// Loader with every framework declaration registered
    ///
    /// # Panics
    ///
    /// On first use, if a framework declaration is malformed.
    pub static ref STD_LOADER: StructClassLoader = match StructClassLoader::with_framework() {
        Ok(loader) => loader,
        Err(err) => panic!("framework declarations are malformed: {}", err),
    };
}

/// Descriptors already built during one call to
/// [`StructClassLoader::reified`], by type string
type Built = HashMap<String, DynReified>;

impl StructClassLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader with the framework declarations registered.
    pub fn with_framework() -> TypeTagResult<Self> {
        let mut loader = Self::new();
        for decl in framework::declarations()? {
            loader.register(decl);
        }
        Ok(loader)
    }

    /// Registers `decl` under its normalized name, replacing any earlier
    /// declaration of the same name.
    pub fn register(&mut self, decl: StructDecl) {
        trace!("registering {}", decl.type_name());
        self.decls
            .insert(decl.type_name().to_owned(), Arc::new(decl));
    }

    /// Looks up the declaration of a struct, by any spelling of its name.
    #[must_use]
    pub fn declaration(&self, type_name: &str) -> Option<&StructDecl> {
        let name = compress_type(type_name).ok()?;
        self.decls.get(&name).map(Arc::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Builds the descriptor of the type named by `type_str`.
    ///
    /// # Errors
    ///
    /// * [`ReifyError::MalformedTypeString`] if `type_str` does not parse,
    ///   or if the descriptor would nest deeper than [`MAX_TYPE_DEPTH`]
    ///   (which is how a declaration that contains itself is reported)
    /// * [`ReifyError::UnknownType`] if a struct involved is not registered
    /// * [`ReifyError::TypeArgumentCountMismatch`] if a generic type is given
    ///   the wrong number of arguments
    /// * [`ShapeError::NoFields`](crate::reified::ShapeError::NoFields) if a
    ///   struct involved declares no fields
    pub fn reified(&self, type_str: &str) -> ReifyResult<DynReified> {
        self.reified_at(type_str, 0, &mut Built::new())
    }

    fn reified_at(&self, type_str: &str, depth: usize, built: &mut Built) -> ReifyResult<DynReified> {
        if let Some(r) = built.get(type_str) {
            return Ok(r.clone());
        }
        let (name, args) = parse_type_name(type_str)?;
        if depth > MAX_TYPE_DEPTH {
            debug!("gave up on {} at depth {}", name, depth);
            return Err(TypeTagError::TooDeep(name).into());
        }
        if let Some(prim) = Primitive::from_name(&name) {
            expect_no_args(&name, &args)?;
            return Ok(DynReified::Primitive(prim));
        }
        let r = match name.as_str() {
            "vector" => match args.as_slice() {
                [elem] => DynReified::vector(self.reified_at(elem, depth + 1, built)?),
                _ => {
                    return Err(ReifyError::TypeArgumentCountMismatch {
                        type_name: name,
                        expected: 1,
                        actual: args.len(),
                    })
                }
            },
            "signer" => return Err(ReifyError::UnknownType(name)),
            _ => self.reified_struct(&name, &args, depth, built)?,
        };
        built.insert(type_str.to_owned(), r.clone());
        Ok(r)
    }

    fn reified_struct(
        &self,
        name: &str,
        args: &[String],
        depth: usize,
        built: &mut Built,
    ) -> ReifyResult<DynReified> {
        let head = compress_type(name)?;
        let decl = self.decls.get(&head).cloned().ok_or_else(|| {
            debug!("no declaration for {}", head);
            ReifyError::UnknownType(head.clone())
        })?;
        decl.check_arity(args.len())?;
        decl.check_fields()?;

        let args = args
            .iter()
            .map(|arg| compress_type(arg))
            .collect::<TypeTagResult<Vec<String>>>()?;
        let mut data_args = Vec::new();
        let mut phantom_args = Vec::new();
        for (param, arg) in decl.type_params().iter().zip(args.iter()) {
            match param.kind {
                ParamKind::Data => data_args.push(self.reified_at(arg, depth + 1, built)?),
                ParamKind::Phantom => phantom_args.push(PhantomReified::new(arg.clone())),
            }
        }
        let fields = decl
            .fields()
            .iter()
            .map(|field| {
                let field_type = decl.instantiate(&field.type_template, &args)?;
                Ok((field.name.clone(), self.reified_at(&field_type, depth + 1, built)?))
            })
            .collect::<ReifyResult<Vec<_>>>()?;

        let s = DynStruct::new(decl, data_args, phantom_args, fields)?;
        trace!("built descriptor for {}", s.full_type_name());
        Ok(DynReified::Struct(Arc::new(s)))
    }
}

fn expect_no_args(name: &str, args: &[String]) -> ReifyResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ReifyError::TypeArgumentCountMismatch {
            type_name: name.to_owned(),
            expected: 0,
            actual: args.len(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::framework::sui::{CoinReified, SuiReified};
    use crate::reified::{Reified, ShapeError, StructReified};

    #[test]
    fn primitives_and_vectors() {
        assert_eq!(STD_LOADER.reified("u64"), Ok(DynReified::Primitive(Primitive::U64)));
        assert_eq!(
            STD_LOADER.reified("vector<vector<bool>>").unwrap().full_type_name(),
            "vector<vector<bool>>"
        );
    }

    #[test]
    fn normalizes_names() {
        let r = STD_LOADER
            .reified("0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<0x02::sui::SUI>")
            .unwrap();
        assert_eq!(r.full_type_name(), "0x2::coin::Coin<0x2::sui::SUI>");
        assert!(STD_LOADER.declaration("0x02::coin::Coin").is_some());
    }

    #[test]
    fn matches_static_descriptor() {
        let r = STD_LOADER.reified("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
        let stat = CoinReified::new(SuiReified.phantom());
        assert_eq!(r.layout(), stat.layout());
        assert_eq!(r.full_type_name(), stat.full_type_name());
        assert!(r.is_type(CoinReified::TYPE_NAME));
    }

    #[test]
    fn phantom_args_need_no_declaration() {
        let r = STD_LOADER.reified("0x2::balance::Balance<0xabc::usdc::USDC>").unwrap();
        assert_eq!(r.layout().decode(&[1, 0, 0, 0, 0, 0, 0, 0]).map(|_| ()), Ok(()));
    }

    #[test]
    fn errors() {
        assert!(matches!(
            STD_LOADER.reified("0x2::nope::Nope"),
            Err(ReifyError::UnknownType(name)) if name == "0x2::nope::Nope"
        ));
        assert!(matches!(
            STD_LOADER.reified("0x1::option::Option<0xabc::x::Y>"),
            Err(ReifyError::UnknownType(_))
        ));
        assert_eq!(
            STD_LOADER.reified("0x2::coin::Coin"),
            Err(ReifyError::TypeArgumentCountMismatch {
                type_name: String::from("0x2::coin::Coin"),
                expected: 1,
                actual: 0
            })
        );
        assert!(matches!(
            STD_LOADER.reified("vector<u8, u8>"),
            Err(ReifyError::TypeArgumentCountMismatch { expected: 1, actual: 2, .. })
        ));
        assert!(matches!(
            STD_LOADER.reified("0x2::coin::Coin<"),
            Err(ReifyError::MalformedTypeString(_))
        ));
        assert!(matches!(
            STD_LOADER.reified("u8<u8>"),
            Err(ReifyError::TypeArgumentCountMismatch { .. })
        ));
    }

    #[test]
    fn custom_declarations() {
        let mut loader = StructClassLoader::with_framework().unwrap();
        loader.register(
            StructDecl::new("0xabc::pool::Pool")
                .unwrap()
                .phantom_param("X")
                .data_param("T")
                .field("name", "0x1::string::String")
                .field("reserve", "0x2::balance::Balance<X>")
                .field("extra", "0x1::option::Option<T>"),
        );
        let r = loader.reified("0xabc::pool::Pool<0x2::sui::SUI, u16>").unwrap();
        let s = r.as_struct().unwrap();
        assert_eq!(s.data_args(), &[DynReified::Primitive(Primitive::U16)]);
        assert_eq!(s.phantom_args()[0].phantom_type(), "0x2::sui::SUI");
        assert_eq!(s.type_args(), &[String::from("0x2::sui::SUI"), String::from("u16")]);

        let bytes = [0x01, b'p', 0x05, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x09, 0x00];
        let val = r.from_bcs(&bytes).unwrap();
        assert_eq!(r.to_bcs(&val), Ok(bytes.to_vec()));
        assert_eq!(
            crate::reified::ToJsonField::to_json_field(&val),
            serde_json::json!({"name": "p", "reserve": {"value": "5"}, "extra": 9})
        );
    }

    #[test]
    fn deep_type_strings_are_rejected() {
        let deep = format!("{}u8{}", "vector<".repeat(1000), ">".repeat(1000));
        assert!(matches!(
            STD_LOADER.reified(&deep),
            Err(ReifyError::MalformedTypeString(TypeTagError::TooDeep(_)))
        ));
        let ok = format!("{}u8{}", "vector<".repeat(MAX_TYPE_DEPTH), ">".repeat(MAX_TYPE_DEPTH));
        assert!(STD_LOADER.reified(&ok).is_ok());
    }

    #[test]
    fn nested_options_are_built_once() {
        let depth = 100;
        let nested = format!(
            "{}u8{}",
            "0x1::option::Option<".repeat(depth),
            ">".repeat(depth)
        );
        let r = STD_LOADER.reified(&nested).unwrap();
        let mut bytes = vec![0x01; depth];
        bytes.push(0x2a);
        assert!(r.from_bcs(&bytes).is_ok());
    }

    #[test]
    fn self_containing_declaration() {
        let mut loader = StructClassLoader::with_framework().unwrap();
        loader.register(
            StructDecl::new("0xabc::list::Node")
                .unwrap()
                .field("value", "u64")
                .field("next", "0x1::option::Option<0xabc::list::Node>"),
        );
        assert!(matches!(
            loader.reified("0xabc::list::Node"),
            Err(ReifyError::MalformedTypeString(TypeTagError::TooDeep(_)))
        ));
    }

    #[test]
    fn fieldless_declaration() {
        let mut loader = StructClassLoader::new();
        loader.register(StructDecl::new("0xabc::e::Empty").unwrap());
        assert_eq!(
            loader.reified("vector<0xabc::e::Empty>"),
            Err(ReifyError::UnknownVariant(ShapeError::NoFields(String::from(
                "0xabc::e::Empty"
            ))))
        );
    }

    #[test]
    fn framework_declarations_load() {
        let loader = StructClassLoader::with_framework().unwrap();
        assert_eq!(loader.len(), STD_LOADER.len());
        assert!(!loader.is_empty());
    }
}
