//! Account Info Projection

use crate::domain::entity::{InventoryEntry, ReceivedCoins, SentCoins};
use crate::domain::value_object::Coins;

/// Read-only view of an account: balance, inventory and transfer history
///
/// The four parts are read independently, so a concurrent mutation may be
/// reflected in some parts and not others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub coins: Coins,
    pub inventory: Vec<InventoryEntry>,
    pub coin_history: CoinHistory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinHistory {
    pub sent: Vec<SentCoins>,
    pub received: Vec<ReceivedCoins>,
}
