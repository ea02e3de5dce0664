//! Authenticate Use Case
//!
//! Signs a user in, provisioning the account on the first login for an
//! unseen user name. The password given on that first login becomes the
//! account's password.

use std::sync::Arc;

use crate::application::config::MerchConfig;
use crate::application::session_token::SessionTokenService;
use crate::domain::entity::{Account, NewAccount};
use crate::domain::repository::LedgerStore;
use crate::domain::value_object::{RawPassword, UserName, UserPassword};
use crate::error::{MerchError, MerchResult};

/// Authenticate input
pub struct AuthenticateInput {
    pub username: String,
    pub password: String,
}

/// Authenticate output
#[derive(Debug)]
pub struct AuthenticateOutput {
    /// Signed bearer token
    pub token: String,
    pub user_name: UserName,
    /// True if this call provisioned the account
    pub registered: bool,
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: LedgerStore,
{
    repo: Arc<R>,
    config: Arc<MerchConfig>,
}

impl<R> AuthenticateUseCase<R>
where
    R: LedgerStore,
{
    pub fn new(repo: Arc<R>, config: Arc<MerchConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> MerchResult<AuthenticateOutput> {
        let user_name =
            UserName::new(input.username).map_err(|e| MerchError::InvalidInput(e.to_string()))?;
        let raw_password = Arc::new(RawPassword::new(input.password)?);

        let (account, registered) = match self.repo.find_account(&user_name).await? {
            Some(account) => (account, false),
            None => self.register(&user_name, Arc::clone(&raw_password)).await?,
        };

        // A freshly provisioned account was hashed from this very password
        if !registered && !self.verify_password(&account, raw_password).await? {
            return Err(MerchError::InvalidCredentials);
        }

        let token = SessionTokenService::new(&self.config).issue(&account.user_name)?;

        tracing::info!(user_name = %account.user_name, registered, "User authenticated");

        Ok(AuthenticateOutput {
            token,
            user_name: account.user_name,
            registered,
        })
    }

    /// Provision the account, or adopt the one a concurrent login created
    ///
    /// Returns the account and whether this call created it.
    async fn register(
        &self,
        user_name: &UserName,
        raw_password: Arc<RawPassword>,
    ) -> MerchResult<(Account, bool)> {
        let pepper = self.config.password_pepper.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            UserPassword::from_raw(&raw_password, pepper.as_deref())
        })
        .await??;

        let new_account = NewAccount::new(
            user_name.clone(),
            password_hash,
            self.config.starting_balance(),
        );

        match self.repo.create_account(&new_account).await {
            Ok(()) => {
                tracing::info!(
                    user_name = %user_name,
                    starting_balance = %new_account.starting_balance,
                    "Account registered"
                );
                let account = self.repo.find_account(user_name).await?.ok_or_else(|| {
                    MerchError::Internal("account missing right after creation".to_string())
                })?;
                Ok((account, true))
            }
            Err(MerchError::UserAlreadyExists) => {
                tracing::debug!(user_name = %user_name, "Lost registration race, re-reading account");
                let account = self
                    .repo
                    .find_account(user_name)
                    .await?
                    .ok_or(MerchError::RegistrationConflict)?;
                Ok((account, false))
            }
            Err(e) => Err(e),
        }
    }

    async fn verify_password(
        &self,
        account: &Account,
        raw_password: Arc<RawPassword>,
    ) -> MerchResult<bool> {
        let password_hash = account.password_hash.clone();
        let pepper = self.config.password_pepper.clone();
        let valid = tokio::task::spawn_blocking(move || {
            password_hash.verify(&raw_password, pepper.as_deref())
        })
        .await?;
        Ok(valid)
    }
}
