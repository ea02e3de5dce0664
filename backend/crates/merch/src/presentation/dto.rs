//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::{AccountInfo, InventoryEntry, ReceivedCoins, SentCoins};

// ============================================================================
// Auth
// ============================================================================

/// Auth request
///
/// Missing fields deserialize as empty strings and are rejected by
/// validation, so every bad body gets the same error shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Auth response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

// ============================================================================
// Send Coin
// ============================================================================

/// Send coin request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinRequest {
    #[serde(default)]
    pub to_user: String,
    /// Signed so that negative amounts reach validation instead of failing
    /// deserialization
    #[serde(default)]
    pub amount: i64,
}

// ============================================================================
// Info
// ============================================================================

/// Info response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub coins: u32,
    pub inventory: Vec<InventoryItemDto>,
    pub coin_history: CoinHistoryDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemDto {
    #[serde(rename = "type")]
    pub item_type: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinHistoryDto {
    pub sent: Vec<SentCoinsDto>,
    pub received: Vec<ReceivedCoinsDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentCoinsDto {
    pub to_user: String,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedCoinsDto {
    pub from_user: String,
    pub amount: u32,
}

impl From<InventoryEntry> for InventoryItemDto {
    fn from(entry: InventoryEntry) -> Self {
        Self {
            item_type: entry.item.into(),
            quantity: entry.quantity,
        }
    }
}

impl From<SentCoins> for SentCoinsDto {
    fn from(sent: SentCoins) -> Self {
        Self {
            to_user: sent.to_user.into_inner(),
            amount: sent.amount.value(),
        }
    }
}

impl From<ReceivedCoins> for ReceivedCoinsDto {
    fn from(received: ReceivedCoins) -> Self {
        Self {
            from_user: received.from_user.into_inner(),
            amount: received.amount.value(),
        }
    }
}

impl From<AccountInfo> for InfoResponse {
    fn from(info: AccountInfo) -> Self {
        Self {
            coins: info.coins.value(),
            inventory: info.inventory.into_iter().map(Into::into).collect(),
            coin_history: CoinHistoryDto {
                sent: info.coin_history.sent.into_iter().map(Into::into).collect(),
                received: info
                    .coin_history
                    .received
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            },
        }
    }
}
