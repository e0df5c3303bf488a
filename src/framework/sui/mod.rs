//! Shapes of the Sui framework, published at `0x2`

pub mod balance;
pub mod coin;
pub mod object;
#[allow(clippy::module_inception)]
pub mod sui;
pub mod url;
pub mod vec_map;

pub use balance::{Balance, BalanceReified, Supply, SupplyReified};
pub use coin::{Coin, CoinReified};
pub use object::{IdReified, UidReified};
pub use sui::{SuiReified, SUI};
pub use url::UrlReified;
pub use vec_map::{Entry, EntryReified, VecMap, VecMapReified};

use crate::dynamic::decl::StructDecl;
use crate::typetag::TypeTagResult;

pub fn declarations() -> TypeTagResult<Vec<StructDecl>> {
    let mut decls = object::declarations()?;
    decls.extend(url::declarations()?);
    decls.extend(balance::declarations()?);
    decls.extend(coin::declarations()?);
    decls.extend(vec_map::declarations()?);
    decls.extend(sui::declarations()?);
    Ok(decls)
}
