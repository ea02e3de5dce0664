//! Coin Transfer Entities
//!
//! Transfers form an append-only audit trail. The two projections below are
//! the per-account views used by the info endpoint.

use crate::domain::value_object::{Coins, UserName};

/// Immutable transfer record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: UserName,
    pub to: UserName,
    /// Always strictly positive
    pub amount: Coins,
}

/// Outgoing transfer as seen by the sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCoins {
    pub to_user: UserName,
    pub amount: Coins,
}

/// Incoming transfer as seen by the recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedCoins {
    pub from_user: UserName,
    pub amount: Coins,
}

impl Transfer {
    pub fn as_sent(&self) -> SentCoins {
        SentCoins {
            to_user: self.to.clone(),
            amount: self.amount,
        }
    }

    pub fn as_received(&self) -> ReceivedCoins {
        ReceivedCoins {
            from_user: self.from.clone(),
            amount: self.amount,
        }
    }
}
