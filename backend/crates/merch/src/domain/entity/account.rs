//! Account Entity
//!
//! A user's identity plus coin balance. Accounts are provisioned on the
//! first authentication for an unseen username and never deleted.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{Coins, UserName, UserPassword};

/// Persisted account
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique, immutable identity key
    pub user_name: UserName,
    /// Argon2id hash fixed at registration
    pub password_hash: UserPassword,
    /// Current balance; only moved by guarded store operations
    pub coins: Coins,
    pub created_at: DateTime<Utc>,
}

/// Account to be provisioned
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_name: UserName,
    pub password_hash: UserPassword,
    pub starting_balance: Coins,
}

impl NewAccount {
    pub fn new(user_name: UserName, password_hash: UserPassword, starting_balance: Coins) -> Self {
        Self {
            user_name,
            password_hash,
            starting_balance,
        }
    }

    /// Materialize the row as the store persists it
    pub fn into_account(self, created_at: DateTime<Utc>) -> Account {
        Account {
            user_name: self.user_name,
            password_hash: self.password_hash,
            coins: self.starting_balance,
            created_at,
        }
    }
}
