//! Textual and structured type tags
//!
//! Type strings as they appear in node responses look like
//! `0x2::balance::Balance<0x2::sui::SUI>`: a primitive, `vector<T>`, or a
//! fully-qualified struct name optionally followed by a bracketed list of
//! type arguments. The same type can be spelled several ways (padded or
//! compressed package address, `", "` or `","` between arguments), so
//! every comparison in the crate goes through [`compress_type`] first.
//!
//! The free functions here work directly on strings; [`TypeTag`] is the
//! parsed form, whose `Display` is the normalized string.

pub mod error;

use std::fmt::Display;
use std::str::FromStr;

pub use error::{TypeTagError, TypeTagResult};

use crate::address::Address;
use crate::hexstring::strip_prefix;

/// Deepest nesting of type arguments accepted in a type string, counting
/// each `<` as one level. Matches the type-nesting cap of the Move VM.
pub const MAX_TYPE_DEPTH: usize = 128;

/// Splits a type string into its head and its top-level type arguments.
///
/// Commas nested inside an argument's own brackets are not split points.
/// Whitespace around the head and each argument is trimmed. Strings nesting
/// deeper than [`MAX_TYPE_DEPTH`] are rejected with
/// [`TypeTagError::TooDeep`] before any argument is split off, so that the
/// recursive consumers of this function stay within a bounded depth.
///
/// ```
/// # use reified::typetag::parse_type_name;
/// let (name, args) = parse_type_name("0x2::vec_map::VecMap<u8, vector<0x1::a::B<u8,u16>>>").unwrap();
/// assert_eq!(name, "0x2::vec_map::VecMap");
/// assert_eq!(args, vec!["u8", "vector<0x1::a::B<u8,u16>>"]);
/// ```
pub fn parse_type_name(s: &str) -> TypeTagResult<(String, Vec<String>)> {
    let s = s.trim();
    let open = match s.find('<') {
        None => {
            if s.contains('>') {
                return Err(TypeTagError::UnbalancedBrackets(s.to_owned()));
            }
            if s.is_empty() || s.contains(',') {
                return Err(TypeTagError::InvalidName(s.to_owned()));
            }
            return Ok((s.to_owned(), Vec::new()));
        }
        Some(ix) => ix,
    };
    if !s.ends_with('>') {
        return Err(TypeTagError::UnbalancedBrackets(s.to_owned()));
    }
    let name = s[..open].trim();
    if name.is_empty() {
        return Err(TypeTagError::InvalidName(s.to_owned()));
    }
    let inner = &s[open + 1..s.len() - 1];

    let mut args = Vec::new();
    let mut depth: usize = 0;
    let mut deepest: usize = 0;
    let mut start = 0;
    for (ix, ch) in inner.char_indices() {
        match ch {
            '<' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TypeTagError::UnbalancedBrackets(s.to_owned()))?;
            }
            ',' if depth == 0 => {
                args.push(inner[start..ix].trim().to_owned());
                start = ix + 1;
            }
            _ => (),
        }
    }
    if depth != 0 {
        return Err(TypeTagError::UnbalancedBrackets(s.to_owned()));
    }
    // the outer brackets are one level
    if deepest + 1 > MAX_TYPE_DEPTH {
        return Err(TypeTagError::TooDeep(name.to_owned()));
    }
    args.push(inner[start..].trim().to_owned());
    if args.iter().any(String::is_empty) {
        return Err(TypeTagError::EmptyArgument(s.to_owned()));
    }
    Ok((name.to_owned(), args))
}

/// Strips the `0x` prefix and leading zeros from a hex address and
/// lower-cases it, yielding `0x0` for the all-zero address.
///
/// ```
/// # use reified::typetag::compress_address;
/// assert_eq!(compress_address("0x0000000000000000000000000000000000000000000000000000000000000002"), "0x2");
/// assert_eq!(compress_address("0x000"), "0x0");
/// ```
#[must_use]
pub fn compress_address(addr: &str) -> String {
    let trimmed = strip_prefix(addr).trim_start_matches('0');
    if trimmed.is_empty() {
        String::from("0x0")
    } else {
        format!("0x{}", trimmed.to_ascii_lowercase())
    }
}

/// Normalizes a type string: package addresses are compressed at every
/// level, whitespace is removed and type arguments are joined by `,`.
///
/// Idempotent: normalizing an already-normalized string returns it
/// unchanged.
pub fn compress_type(s: &str) -> TypeTagResult<String> {
    s.parse::<TypeTag>().map(|tag| tag.to_string())
}

/// Assembles a type string from a head and its arguments, joined by `", "`.
///
/// This is the display form used for `full_type_name`; it is not
/// normalized, so compare through [`compress_type`].
#[must_use]
pub fn compose_type<S: AsRef<str>>(name: &str, args: &[S]) -> String {
    if args.is_empty() {
        name.to_owned()
    } else {
        let joined: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        format!("{}<{}>", name, joined.join(", "))
    }
}

/// Returns `true` if `a` and `b` name the same type.
///
/// Strings that fail to parse are compared verbatim.
#[must_use]
pub fn same_type(a: &str, b: &str) -> bool {
    match (compress_type(a), compress_type(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => a.trim() == b.trim(),
    }
}

/// Scalar types with a fixed-width encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Bool,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::U128,
        Primitive::U256,
        Primitive::Address,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::U128 => "u128",
            Primitive::U256 => "u256",
            Primitive::Address => "address",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|prim| prim.name() == name)
    }

    /// Integers at least this wide travel as decimal strings in JSON.
    #[must_use]
    pub const fn is_wide_integer(self) -> bool {
        matches!(self, Primitive::U64 | Primitive::U128 | Primitive::U256)
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully-qualified struct type with its type arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructTag {
    pub address: Address,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    /// The normalized `address::module::Name`, without type arguments
    #[must_use]
    pub fn base_name(&self) -> String {
        format!("{}::{}::{}", self.address.to_short_string(), self.module, self.name)
    }
}

impl Display for StructTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base_name())?;
        if !self.type_params.is_empty() {
            let args: Vec<String> = self.type_params.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", args.join(","))?;
        }
        Ok(())
    }
}

/// Parsed form of a type string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Primitive(Primitive),
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

impl TypeTag {
    #[must_use]
    pub fn vector(elem: TypeTag) -> Self {
        TypeTag::Vector(Box::new(elem))
    }

    /// Returns the head of the type: the primitive name, `vector`, or the
    /// normalized struct name without type arguments.
    #[must_use]
    pub fn head(&self) -> String {
        match self {
            TypeTag::Primitive(prim) => prim.name().to_owned(),
            TypeTag::Signer => String::from("signer"),
            TypeTag::Vector(_) => String::from("vector"),
            TypeTag::Struct(tag) => tag.base_name(),
        }
    }

    /// Returns the type arguments of the type.
    #[must_use]
    pub fn type_args(&self) -> Vec<&TypeTag> {
        match self {
            TypeTag::Primitive(_) | TypeTag::Signer => Vec::new(),
            TypeTag::Vector(elem) => vec![elem.as_ref()],
            TypeTag::Struct(tag) => tag.type_params.iter().collect(),
        }
    }
}

impl From<Primitive> for TypeTag {
    fn from(prim: Primitive) -> Self {
        TypeTag::Primitive(prim)
    }
}

impl From<StructTag> for TypeTag {
    fn from(tag: StructTag) -> Self {
        TypeTag::Struct(Box::new(tag))
    }
}

fn expect_arity(name: &str, expected: usize, args: &[String]) -> TypeTagResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(TypeTagError::WrongArity {
            name: name.to_owned(),
            expected,
            actual: args.len(),
        })
    }
}

impl FromStr for TypeTag {
    type Err = TypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = parse_type_name(s)?;
        if let Some(prim) = Primitive::from_name(&name) {
            expect_arity(&name, 0, &args)?;
            return Ok(TypeTag::Primitive(prim));
        }
        match name.as_str() {
            "signer" => {
                expect_arity(&name, 0, &args)?;
                Ok(TypeTag::Signer)
            }
            "vector" => {
                expect_arity(&name, 1, &args)?;
                Ok(TypeTag::vector(args[0].parse()?))
            }
            _ => {
                let parts: Vec<&str> = name.split("::").map(str::trim).collect();
                let (addr, module, ident) = match parts.as_slice() {
                    [addr, module, ident] if !module.is_empty() && !ident.is_empty() => {
                        (*addr, *module, *ident)
                    }
                    _ => return Err(TypeTagError::InvalidName(name)),
                };
                let address = addr
                    .parse::<Address>()
                    .map_err(|err| TypeTagError::InvalidAddress(name.clone(), err))?;
                let type_params = args
                    .iter()
                    .map(|arg| arg.parse())
                    .collect::<TypeTagResult<Vec<TypeTag>>>()?;
                Ok(StructTag {
                    address,
                    module: module.to_owned(),
                    name: ident.to_owned(),
                    type_params,
                }
                .into())
            }
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Primitive(prim) => Display::fmt(prim, f),
            TypeTag::Signer => f.write_str("signer"),
            TypeTag::Vector(elem) => write!(f, "vector<{}>", elem),
            TypeTag::Struct(tag) => Display::fmt(tag, f),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn split_respects_nesting() {
        assert_eq!(
            parse_type_name("0x2::balance::Balance<0x2::sui::SUI>").unwrap(),
            (
                String::from("0x2::balance::Balance"),
                vec![String::from("0x2::sui::SUI")]
            )
        );
        assert_eq!(
            parse_type_name("u64").unwrap(),
            (String::from("u64"), Vec::new())
        );
    }

    #[test]
    fn malformed_strings() {
        for bad in [
            "0x1::a::B<u8",
            "0x1::a::B<u8>>",
            "0x1::a::B<u8>x",
            "0x1::a::B<<u8>",
            "0x1::a::B>",
        ] {
            assert!(
                matches!(parse_type_name(bad), Err(TypeTagError::UnbalancedBrackets(_))),
                "{}",
                bad
            );
        }
        assert!(matches!(
            parse_type_name("0x1::a::B<u8,>"),
            Err(TypeTagError::EmptyArgument(_))
        ));
        assert!(matches!(
            parse_type_name("0x1::a::B<>"),
            Err(TypeTagError::EmptyArgument(_))
        ));
        assert!(matches!(
            compress_type("0x1::B"),
            Err(TypeTagError::InvalidName(_))
        ));
        assert!(matches!(
            compress_type("vector<u8, u16>"),
            Err(TypeTagError::WrongArity { .. })
        ));
    }

    #[test]
    fn normalization() {
        let long = "0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<0x00000000000000000000000000000000000000000000000000000000000000AB::x::Y>";
        assert_eq!(compress_type(long).unwrap(), "0x2::coin::Coin<0xab::x::Y>");
        assert_eq!(
            compress_type("0x2::vec_map::VecMap< u8 , vector<0x02::a::B> >").unwrap(),
            "0x2::vec_map::VecMap<u8,vector<0x2::a::B>>"
        );
        assert_eq!(compress_type("0x0::a::B").unwrap(), "0x0::a::B");
    }

    #[test]
    fn normalization_idempotent() {
        for s in [
            "0x00002::balance::Balance<0x2::sui::SUI>",
            "vector<vector<0x1::option::Option<u256>>>",
            "0x2::vec_map::VecMap<0x1::string::String, 0x0002::object::ID>",
            "address",
        ] {
            let once = compress_type(s).unwrap();
            assert_eq!(compress_type(&once).unwrap(), once);
        }
    }

    #[test]
    fn compose_then_compare() {
        let full = compose_type("0x2::vec_map::VecMap", &["u8", "0x1::string::String"]);
        assert_eq!(full, "0x2::vec_map::VecMap<u8, 0x1::string::String>");
        assert!(same_type(
            &full,
            "0x0000000000000000000000000000000000000000000000000000000000000002::vec_map::VecMap<u8,0x1::string::String>"
        ));
        assert!(!same_type(
            "0x2::balance::Balance<0x2::sui::SUI>",
            "0x2::balance::Balance<0x3::sui::SUI>"
        ));
    }

    fn nested_vectors(depth: usize) -> String {
        format!("{}u8{}", "vector<".repeat(depth), ">".repeat(depth))
    }

    #[test]
    fn nesting_is_capped() {
        let deepest = nested_vectors(MAX_TYPE_DEPTH);
        assert_eq!(compress_type(&deepest), Ok(deepest.clone()));
        assert_eq!(
            compress_type(&nested_vectors(MAX_TYPE_DEPTH + 1)),
            Err(TypeTagError::TooDeep(String::from("vector")))
        );
        let thousand = nested_vectors(1000);
        assert!(matches!(parse_type_name(&thousand), Err(TypeTagError::TooDeep(_))));
        assert!(matches!(thousand.parse::<TypeTag>(), Err(TypeTagError::TooDeep(_))));
        let wide = format!("0x2::vec_map::VecMap<{}, {}>", nested_vectors(100), nested_vectors(100));
        assert!(compress_type(&wide).is_ok());
    }

    #[test]
    fn tag_structure() {
        let tag: TypeTag = "vector<0x2::coin::Coin<0x2::sui::SUI>>".parse().unwrap();
        assert_eq!(tag.head(), "vector");
        let elem = tag.type_args()[0].clone();
        assert_eq!(elem.head(), "0x2::coin::Coin");
        assert_eq!(elem.type_args()[0].to_string(), "0x2::sui::SUI");
    }
}
