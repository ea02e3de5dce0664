//! Buy Item Use Case
//!
//! Price lookup happens outside the transaction; the deduction, the
//! purchase record and the inventory credit commit together or not at all.

use std::sync::Arc;

use crate::domain::entity::Purchase;
use crate::domain::repository::{LedgerStore, LedgerTransaction};
use crate::domain::value_object::{Coins, ItemName, UserName};
use crate::error::{MerchError, MerchResult};

/// Buy item use case
pub struct BuyItemUseCase<R>
where
    R: LedgerStore,
{
    repo: Arc<R>,
}

impl<R> BuyItemUseCase<R>
where
    R: LedgerStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Buy one unit of `item` for `buyer`, returning the price paid
    pub async fn execute(&self, buyer: &UserName, item: &str) -> MerchResult<Coins> {
        let item = ItemName::new(item).map_err(|_| MerchError::ItemNotFound)?;
        let price = self
            .repo
            .find_price(&item)
            .await?
            .ok_or(MerchError::ItemNotFound)?;

        let mut tx = self.repo.begin().await?;
        tx.deduct_coins(buyer, price).await?;
        tx.record_purchase(&Purchase::new(buyer.clone(), item.clone(), price))
            .await?;
        tx.credit_inventory(buyer, &item).await?;
        tx.commit().await?;

        tracing::info!(buyer = %buyer, item = %item, price = %price, "Item purchased");

        Ok(price)
    }
}
