//! Decoding objects handed over by an external object source
//!
//! Transport is not this crate's business: an [`ObjectSource`] returns the
//! type string and BCS bytes of an object by its identifier, and the
//! functions here check the type before decoding.

use std::fmt::{Debug, Display};

use log::debug;

use crate::address::Address;
use crate::dynamic::DecodedValue;
use crate::loader::StructClassLoader;
use crate::reified::{Reified, ReifyError};
use crate::typetag::same_type;

/// An object's type and contents as delivered by an [`ObjectSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBcs {
    pub type_name: String,
    pub bcs_bytes: Vec<u8>,
}

/// Anything that can look up on-chain objects by identifier
pub trait ObjectSource {
    type Error;

    /// Returns the object stored under `id`, or an error if there is none.
    fn get_object_bcs(&self, id: &Address) -> Result<ObjectBcs, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError<E> {
    /// The source could not produce the object
    Source(E),
    /// The object was produced but is not of the expected type, or did not
    /// decode as one
    Reify(ReifyError),
}

impl<E> From<ReifyError> for FetchError<E> {
    fn from(err: ReifyError) -> Self {
        FetchError::Reify(err)
    }
}

impl<E: Display> Display for FetchError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Source(err) => write!(f, "object source failed: {}", err),
            FetchError::Reify(err) => write!(f, "{}", err),
        }
    }
}

impl<E: Debug + Display> std::error::Error for FetchError<E> {}

/// Fetches the object `id` and decodes it with `reified`.
///
/// The object's type must be exactly the type `reified` describes, type
/// arguments included, or a [`ReifyError::SchemaMismatch`] is returned
/// without decoding.
pub fn fetch<S, R>(source: &S, reified: &R, id: &Address) -> Result<R::Field, FetchError<S::Error>>
where
    S: ObjectSource + ?Sized,
    R: Reified,
{
    let obj = source.get_object_bcs(id).map_err(FetchError::Source)?;
    let expected = reified.full_type_name();
    if !same_type(&obj.type_name, &expected) {
        debug!("object {} is a {}, not a {}", id, obj.type_name, expected);
        return Err(ReifyError::mismatch(expected, obj.type_name).into());
    }
    Ok(reified.from_bcs(&obj.bcs_bytes)?)
}

/// Fetches the object `id` and decodes it as whatever type it declares,
/// building the descriptor with `loader`.
pub fn fetch_dynamic<S>(
    source: &S,
    loader: &StructClassLoader,
    id: &Address,
) -> Result<DecodedValue, FetchError<S::Error>>
where
    S: ObjectSource + ?Sized,
{
    let obj = source.get_object_bcs(id).map_err(FetchError::Source)?;
    let reified = loader.reified(&obj.type_name)?;
    Ok(reified.from_bcs(&obj.bcs_bytes)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::framework::sui::{BalanceReified, CoinReified, SuiReified};
    use crate::loader::STD_LOADER;
    use crate::reified::phantom;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct NotFound(Address);

    impl Display for NotFound {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "no object {}", self.0)
        }
    }

    struct Store(HashMap<Address, ObjectBcs>);

    impl ObjectSource for Store {
        type Error = NotFound;

        fn get_object_bcs(&self, id: &Address) -> Result<ObjectBcs, NotFound> {
            self.0.get(id).cloned().ok_or(NotFound(*id))
        }
    }

    fn store() -> Store {
        let mut bytes = vec![0u8; 32];
        bytes[31] = 0x07;
        bytes.extend_from_slice(&[0x64, 0, 0, 0, 0, 0, 0, 0]);
        let mut objects = HashMap::new();
        objects.insert(
            Address::from_u8(7),
            ObjectBcs {
                type_name: String::from(
                    "0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<0x2::sui::SUI>",
                ),
                bcs_bytes: bytes,
            },
        );
        Store(objects)
    }

    #[test]
    fn typed_fetch() {
        let coin = fetch(&store(), &CoinReified::new(SuiReified.phantom()), &Address::from_u8(7))
            .unwrap();
        assert_eq!(coin.balance.value, 100);
    }

    #[test]
    fn wrong_type_is_not_decoded() {
        let usdc = CoinReified::new(phantom("0xabc::usdc::USDC"));
        assert!(matches!(
            fetch(&store(), &usdc, &Address::from_u8(7)),
            Err(FetchError::Reify(ReifyError::SchemaMismatch { .. }))
        ));
        let bal = BalanceReified::new(SuiReified.phantom());
        assert!(matches!(
            fetch(&store(), &bal, &Address::from_u8(7)),
            Err(FetchError::Reify(ReifyError::SchemaMismatch { .. }))
        ));
    }

    #[test]
    fn missing_object() {
        assert_eq!(
            fetch_dynamic(&store(), &STD_LOADER, &Address::from_u8(8)),
            Err(FetchError::Source(NotFound(Address::from_u8(8))))
        );
    }

    #[test]
    fn dynamic_fetch() {
        let val = fetch_dynamic(&store(), &STD_LOADER, &Address::from_u8(7)).unwrap();
        let s = val.as_struct().unwrap();
        assert_eq!(s.full_type_name(), "0x2::coin::Coin<0x2::sui::SUI>");
    }
}
