//! Purchase Entity

use crate::domain::value_object::{Coins, ItemName, UserName};

/// Immutable purchase record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub buyer: UserName,
    pub item: ItemName,
    /// Price paid at the time of purchase
    pub price: Coins,
}

impl Purchase {
    pub fn new(buyer: UserName, item: ItemName, price: Coins) -> Self {
        Self { buyer, item, price }
    }
}
