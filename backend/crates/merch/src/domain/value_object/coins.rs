//! Coins Value Object
//!
//! Balances, prices and transfer amounts are whole, unsigned coin counts.
//! The database stores them as `BIGINT` guarded by a `CHECK` on the `u32`
//! range, so conversions in both directions are checked.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::MerchError;

/// A non-negative number of coins
#[derive(
    Debug, Display, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Coins(u32);

impl Coins {
    pub const ZERO: Coins = Coins(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Validate a requested transfer amount
    ///
    /// Zero, negative and out-of-range values are all `InvalidAmount`.
    pub fn transfer_amount(requested: i64) -> Result<Self, MerchError> {
        if requested <= 0 {
            return Err(MerchError::InvalidAmount);
        }
        u32::try_from(requested)
            .map(Self)
            .map_err(|_| MerchError::InvalidAmount)
    }

    /// Convert a database `BIGINT`
    pub fn from_db(value: i64) -> Result<Self, MerchError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| MerchError::Internal(format!("coin value out of range: {value}")))
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Value for binding to a `BIGINT` column
    #[inline]
    pub fn as_db(self) -> i64 {
        i64::from(self.0)
    }

    pub fn checked_add(self, other: Coins) -> Option<Coins> {
        self.0.checked_add(other.0).map(Coins)
    }

    pub fn checked_sub(self, other: Coins) -> Option<Coins> {
        self.0.checked_sub(other.0).map(Coins)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Coins {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
