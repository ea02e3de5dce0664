//! In-Memory Ledger Store
//!
//! Process-local Ledger Store with the same atomicity contract as the
//! PostgreSQL one. Transactions are serialized: [`InMemoryLedgerStore::begin`]
//! takes an owned lock on the whole ledger and works on a copy, which
//! [`LedgerTransaction::commit`] writes back. Dropping the handle discards
//! the copy. Reads issued while a transaction handle is alive wait for it
//! to finish.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entity::{
    Account, InventoryEntry, NewAccount, Purchase, ReceivedCoins, SentCoins, Transfer,
};
use crate::domain::repository::{LedgerStore, LedgerTransaction};
use crate::domain::value_object::{Coins, ItemName, UserName, UserPassword};
use crate::error::{MerchError, MerchResult};

/// Default merch catalog (item, price)
pub const DEFAULT_CATALOG: &[(&str, u32)] = &[
    ("t-shirt", 80),
    ("cup", 20),
    ("book", 50),
    ("pen", 10),
    ("powerbank", 200),
    ("hoody", 300),
    ("umbrella", 200),
    ("socks", 10),
    ("wallet", 50),
    ("pink-hoody", 500),
];

#[derive(Debug, Clone, Default)]
struct LedgerState {
    accounts: HashMap<UserName, Account>,
    prices: HashMap<ItemName, Coins>,
    inventory: HashMap<UserName, BTreeMap<ItemName, u32>>,
    purchases: Vec<Purchase>,
    transfers: Vec<Transfer>,
}

/// In-memory Ledger Store
#[derive(Clone, Default)]
pub struct InMemoryLedgerStore {
    state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedgerStore {
    /// Empty store with an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with [`DEFAULT_CATALOG`]
    pub fn with_default_catalog() -> Self {
        let prices = DEFAULT_CATALOG
            .iter()
            .filter_map(|(item, price)| Some((ItemName::new(*item).ok()?, Coins::new(*price))))
            .collect();
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                prices,
                ..Default::default()
            })),
        }
    }

    /// Add or reprice a catalog item
    pub async fn set_price(&self, item: ItemName, price: Coins) {
        self.state.lock().await.prices.insert(item, price);
    }

    /// Insert an account directly, bypassing registration
    pub async fn seed_account(
        &self,
        user_name: UserName,
        password_hash: UserPassword,
        coins: Coins,
    ) -> MerchResult<()> {
        self.create_account(&NewAccount::new(user_name, password_hash, coins))
            .await
    }

    /// Current balance, `None` for an unknown account
    pub async fn balance(&self, user_name: &UserName) -> Option<Coins> {
        self.state
            .lock()
            .await
            .accounts
            .get(user_name)
            .map(|account| account.coins)
    }

    /// All purchase records, oldest first
    pub async fn purchases(&self) -> Vec<Purchase> {
        self.state.lock().await.purchases.clone()
    }

    /// All transfer records, oldest first
    pub async fn transfers(&self) -> Vec<Transfer> {
        self.state.lock().await.transfers.clone()
    }
}

/// Serialized transaction over a working copy of the ledger
pub struct InMemoryLedgerTransaction {
    guard: OwnedMutexGuard<LedgerState>,
    working: LedgerState,
}

impl LedgerStore for InMemoryLedgerStore {
    type Transaction = InMemoryLedgerTransaction;

    async fn begin(&self) -> MerchResult<InMemoryLedgerTransaction> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryLedgerTransaction { guard, working })
    }

    async fn find_account(&self, user_name: &UserName) -> MerchResult<Option<Account>> {
        Ok(self.state.lock().await.accounts.get(user_name).cloned())
    }

    async fn create_account(&self, account: &NewAccount) -> MerchResult<()> {
        let mut state = self.state.lock().await;
        if state.accounts.contains_key(&account.user_name) {
            return Err(MerchError::UserAlreadyExists);
        }
        state.accounts.insert(
            account.user_name.clone(),
            account.clone().into_account(Utc::now()),
        );
        Ok(())
    }

    async fn find_price(&self, item: &ItemName) -> MerchResult<Option<Coins>> {
        Ok(self.state.lock().await.prices.get(item).copied())
    }

    async fn list_inventory(&self, user_name: &UserName) -> MerchResult<Vec<InventoryEntry>> {
        let state = self.state.lock().await;
        let entries = state
            .inventory
            .get(user_name)
            .map(|items| {
                items
                    .iter()
                    .filter(|(_, quantity)| **quantity > 0)
                    .map(|(item, quantity)| InventoryEntry {
                        item: item.clone(),
                        quantity: *quantity,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(entries)
    }

    async fn list_sent(&self, user_name: &UserName) -> MerchResult<Vec<SentCoins>> {
        let state = self.state.lock().await;
        Ok(state
            .transfers
            .iter()
            .filter(|t| t.from == *user_name)
            .map(Transfer::as_sent)
            .collect())
    }

    async fn list_received(&self, user_name: &UserName) -> MerchResult<Vec<ReceivedCoins>> {
        let state = self.state.lock().await;
        Ok(state
            .transfers
            .iter()
            .filter(|t| t.to == *user_name)
            .map(Transfer::as_received)
            .collect())
    }
}

impl InMemoryLedgerTransaction {
    fn account_mut(&mut self, user_name: &UserName) -> MerchResult<&mut Account> {
        self.working
            .accounts
            .get_mut(user_name)
            .ok_or(MerchError::UserNotFound)
    }
}

impl LedgerTransaction for InMemoryLedgerTransaction {
    async fn deduct_coins(&mut self, user_name: &UserName, amount: Coins) -> MerchResult<()> {
        let account = self.account_mut(user_name)?;
        account.coins = account
            .coins
            .checked_sub(amount)
            .ok_or(MerchError::InsufficientFunds)?;
        Ok(())
    }

    async fn add_coins(&mut self, user_name: &UserName, amount: Coins) -> MerchResult<()> {
        let account = self.account_mut(user_name)?;
        account.coins = account
            .coins
            .checked_add(amount)
            .ok_or(MerchError::BalanceOverflow)?;
        Ok(())
    }

    async fn record_purchase(&mut self, purchase: &Purchase) -> MerchResult<()> {
        if !self.working.accounts.contains_key(&purchase.buyer) {
            return Err(MerchError::UserNotFound);
        }
        if !self.working.prices.contains_key(&purchase.item) {
            return Err(MerchError::ItemNotFound);
        }
        self.working.purchases.push(purchase.clone());
        Ok(())
    }

    async fn credit_inventory(&mut self, user_name: &UserName, item: &ItemName) -> MerchResult<()> {
        if !self.working.accounts.contains_key(user_name) {
            return Err(MerchError::UserNotFound);
        }
        if !self.working.prices.contains_key(item) {
            return Err(MerchError::ItemNotFound);
        }
        let quantity = self
            .working
            .inventory
            .entry(user_name.clone())
            .or_default()
            .entry(item.clone())
            .or_insert(0);
        *quantity = quantity
            .checked_add(1)
            .ok_or_else(|| MerchError::Internal("inventory quantity overflow".to_string()))?;
        Ok(())
    }

    async fn record_transfer(
        &mut self,
        from: &UserName,
        to: &UserName,
        amount: Coins,
    ) -> MerchResult<()> {
        if !self.working.accounts.contains_key(from) || !self.working.accounts.contains_key(to) {
            return Err(MerchError::UserNotFound);
        }
        self.working.transfers.push(Transfer {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    async fn commit(mut self) -> MerchResult<()> {
        *self.guard = self.working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> UserName {
        UserName::new(s).unwrap()
    }

    fn item(s: &str) -> ItemName {
        ItemName::new(s).unwrap()
    }

    fn dummy_hash() -> UserPassword {
        UserPassword::from_phc_string(
            "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$\
             2uoN3ObMZoq62ydDYwrTTvnzA9s8EGZ3cTD1Tm0Xl3g",
        )
        .unwrap()
    }

    async fn store_with(accounts: &[(&str, u32)]) -> InMemoryLedgerStore {
        let store = InMemoryLedgerStore::with_default_catalog();
        for (user, coins) in accounts {
            store
                .seed_account(name(user), dummy_hash(), Coins::new(*coins))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_create_account_rejects_duplicates() {
        let store = store_with(&[("alice", 0)]).await;
        let result = store
            .create_account(&NewAccount::new(name("alice"), dummy_hash(), Coins::ZERO))
            .await;
        assert!(matches!(result, Err(MerchError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_default_catalog_prices() {
        let store = InMemoryLedgerStore::with_default_catalog();
        assert_eq!(store.find_price(&item("cup")).await.unwrap(), Some(Coins::new(20)));
        assert_eq!(
            store.find_price(&item("pink-hoody")).await.unwrap(),
            Some(Coins::new(500))
        );
        assert_eq!(store.find_price(&item("mug")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_commit_applies_changes() {
        let store = store_with(&[("alice", 100), ("bob", 5)]).await;

        let mut tx = store.begin().await.unwrap();
        tx.deduct_coins(&name("alice"), Coins::new(20)).await.unwrap();
        tx.add_coins(&name("bob"), Coins::new(20)).await.unwrap();
        tx.record_transfer(&name("alice"), &name("bob"), Coins::new(20))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.balance(&name("alice")).await, Some(Coins::new(80)));
        assert_eq!(store.balance(&name("bob")).await, Some(Coins::new(25)));
        assert_eq!(store.transfers().await.len(), 1);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let store = store_with(&[("alice", 100)]).await;

        {
            let mut tx = store.begin().await.unwrap();
            tx.deduct_coins(&name("alice"), Coins::new(60)).await.unwrap();
            tx.credit_inventory(&name("alice"), &item("cup")).await.unwrap();
        }

        assert_eq!(store.balance(&name("alice")).await, Some(Coins::new(100)));
        assert!(store.list_inventory(&name("alice")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_guarded_decrement() {
        let store = store_with(&[("alice", 30)]).await;
        let mut tx = store.begin().await.unwrap();

        assert!(matches!(
            tx.deduct_coins(&name("alice"), Coins::new(31)).await,
            Err(MerchError::InsufficientFunds)
        ));
        assert!(matches!(
            tx.deduct_coins(&name("ghost"), Coins::new(1)).await,
            Err(MerchError::UserNotFound)
        ));
        tx.deduct_coins(&name("alice"), Coins::new(30)).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_coins_overflow() {
        let store = store_with(&[("alice", u32::MAX)]).await;
        let mut tx = store.begin().await.unwrap();
        assert!(matches!(
            tx.add_coins(&name("alice"), Coins::new(1)).await,
            Err(MerchError::BalanceOverflow)
        ));
    }

    #[tokio::test]
    async fn test_credit_inventory_upserts() {
        let store = store_with(&[("alice", 0)]).await;

        let mut tx = store.begin().await.unwrap();
        tx.credit_inventory(&name("alice"), &item("pen")).await.unwrap();
        tx.credit_inventory(&name("alice"), &item("pen")).await.unwrap();
        tx.credit_inventory(&name("alice"), &item("cup")).await.unwrap();
        tx.commit().await.unwrap();

        let inventory = store.list_inventory(&name("alice")).await.unwrap();
        assert_eq!(
            inventory,
            vec![
                InventoryEntry {
                    item: item("cup"),
                    quantity: 1
                },
                InventoryEntry {
                    item: item("pen"),
                    quantity: 2
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_record_transfer_requires_both_accounts() {
        let store = store_with(&[("alice", 10)]).await;
        let mut tx = store.begin().await.unwrap();
        assert!(matches!(
            tx.record_transfer(&name("alice"), &name("ghost"), Coins::new(1))
                .await,
            Err(MerchError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_history_in_insertion_order() {
        let store = store_with(&[("alice", 100), ("bob", 100), ("carol", 100)]).await;

        let mut tx = store.begin().await.unwrap();
        tx.record_transfer(&name("alice"), &name("bob"), Coins::new(3))
            .await
            .unwrap();
        tx.record_transfer(&name("carol"), &name("alice"), Coins::new(7))
            .await
            .unwrap();
        tx.record_transfer(&name("alice"), &name("carol"), Coins::new(5))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let sent = store.list_sent(&name("alice")).await.unwrap();
        assert_eq!(
            sent.iter()
                .map(|s| (s.to_user.as_str(), s.amount.value()))
                .collect::<Vec<_>>(),
            vec![("bob", 3), ("carol", 5)]
        );
        let received = store.list_received(&name("alice")).await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].from_user, name("carol"));
    }
}
