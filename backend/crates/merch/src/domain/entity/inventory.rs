//! Inventory Entity

use crate::domain::value_object::ItemName;

/// Number of units of one item owned by an account
///
/// Created at quantity 1 by the first purchase and only ever incremented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub item: ItemName,
    pub quantity: u32,
}
