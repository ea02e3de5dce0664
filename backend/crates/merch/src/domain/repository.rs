//! Repository Traits
//!
//! The Ledger Store: the transactional persistence boundary over accounts,
//! inventory, purchases and transfers. Implementations live in the
//! infrastructure layer.
//!
//! Mutations of balances only happen through a [`LedgerTransaction`], and
//! only through its guarded operations. There is no way to write a balance
//! directly, so read-modify-write at the application layer cannot be
//! expressed.

use crate::domain::entity::{Account, InventoryEntry, NewAccount, Purchase, ReceivedCoins, SentCoins};
use crate::domain::value_object::{Coins, ItemName, UserName};
use crate::error::MerchResult;

/// Ledger Store: reads, account provisioning, and transaction factory
#[trait_variant::make(LedgerStore: Send)]
pub trait LocalLedgerStore {
    /// Scoped transactional handle returned by [`LocalLedgerStore::begin`]
    type Transaction: LedgerTransaction;

    /// Open a transaction
    async fn begin(&self) -> MerchResult<Self::Transaction>;

    /// Find account by user name
    async fn find_account(&self, user_name: &UserName) -> MerchResult<Option<Account>>;

    /// Insert a new account
    ///
    /// Fails with `UserAlreadyExists` if the user name is taken.
    async fn create_account(&self, account: &NewAccount) -> MerchResult<()>;

    /// Catalog price of an item, `None` if the item is unknown
    async fn find_price(&self, item: &ItemName) -> MerchResult<Option<Coins>>;

    /// Inventory of an account, ordered by item name
    async fn list_inventory(&self, user_name: &UserName) -> MerchResult<Vec<InventoryEntry>>;

    /// Transfers sent by an account, oldest first
    async fn list_sent(&self, user_name: &UserName) -> MerchResult<Vec<SentCoins>>;

    /// Transfers received by an account, oldest first
    async fn list_received(&self, user_name: &UserName) -> MerchResult<Vec<ReceivedCoins>>;
}

/// Scoped transaction over the ledger
///
/// Nothing is visible to other callers until [`LocalLedgerTransaction::commit`].
/// Dropping the handle without committing rolls every step back, so an
/// early `?` return or a cancelled request leaves no partial state.
#[trait_variant::make(LedgerTransaction: Send)]
pub trait LocalLedgerTransaction: Sized {
    /// Guarded decrement
    ///
    /// Atomically subtracts `amount` only if the balance covers it.
    /// Fails with `UserNotFound` or `InsufficientFunds`.
    async fn deduct_coins(&mut self, user_name: &UserName, amount: Coins) -> MerchResult<()>;

    /// Guarded increment
    ///
    /// Fails with `UserNotFound` or `BalanceOverflow`.
    async fn add_coins(&mut self, user_name: &UserName, amount: Coins) -> MerchResult<()>;

    /// Append a purchase record
    async fn record_purchase(&mut self, purchase: &Purchase) -> MerchResult<()>;

    /// Add one unit of `item` to the account's inventory
    async fn credit_inventory(&mut self, user_name: &UserName, item: &ItemName) -> MerchResult<()>;

    /// Append a transfer record
    ///
    /// Fails with `UserNotFound` if either party does not exist.
    async fn record_transfer(
        &mut self,
        from: &UserName,
        to: &UserName,
        amount: Coins,
    ) -> MerchResult<()>;

    /// Make every step of the transaction durable and visible
    async fn commit(self) -> MerchResult<()>;
}
