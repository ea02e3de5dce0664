//! Send Coin Use Case
//!
//! Moves coins between two accounts and appends the audit record, all in
//! one transaction.

use std::sync::Arc;

use crate::domain::repository::{LedgerStore, LedgerTransaction};
use crate::domain::value_object::user_name::UserNameError;
use crate::domain::value_object::{Coins, UserName};
use crate::error::{MerchError, MerchResult};

/// Send coin input
pub struct SendCoinInput {
    pub to_user: String,
    /// Raw requested amount; validated before the store is touched
    pub amount: i64,
}

/// Send coin use case
pub struct SendCoinUseCase<R>
where
    R: LedgerStore,
{
    repo: Arc<R>,
}

impl<R> SendCoinUseCase<R>
where
    R: LedgerStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, sender: &UserName, input: SendCoinInput) -> MerchResult<()> {
        let amount = Coins::transfer_amount(input.amount)?;
        let recipient = UserName::new(input.to_user).map_err(|e| match e {
            UserNameError::Empty => MerchError::InvalidInput("toUser is required".to_string()),
            // No account can carry a name that fails validation
            _ => MerchError::UserNotFound,
        })?;
        if recipient == *sender {
            return Err(MerchError::SelfTransfer);
        }

        let mut tx = self.repo.begin().await?;
        tx.deduct_coins(sender, amount).await?;
        tx.add_coins(&recipient, amount).await?;
        tx.record_transfer(sender, &recipient, amount).await?;
        tx.commit().await?;

        tracing::info!(from = %sender, to = %recipient, amount = %amount, "Coins sent");

        Ok(())
    }
}
