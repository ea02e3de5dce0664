//! Get Info Use Case
//!
//! Read-only aggregation of balance, inventory and transfer history.

use std::sync::Arc;

use crate::domain::entity::{AccountInfo, CoinHistory};
use crate::domain::repository::LedgerStore;
use crate::domain::value_object::UserName;
use crate::error::{MerchError, MerchResult};

/// Get info use case
pub struct GetInfoUseCase<R>
where
    R: LedgerStore,
{
    repo: Arc<R>,
}

impl<R> GetInfoUseCase<R>
where
    R: LedgerStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_name: &UserName) -> MerchResult<AccountInfo> {
        let account = self
            .repo
            .find_account(user_name)
            .await?
            .ok_or(MerchError::UserNotFound)?;

        let inventory = self.repo.list_inventory(user_name).await?;
        let sent = self.repo.list_sent(user_name).await?;
        let received = self.repo.list_received(user_name).await?;

        Ok(AccountInfo {
            coins: account.coins,
            inventory,
            coin_history: CoinHistory { sent, received },
        })
    }
}
