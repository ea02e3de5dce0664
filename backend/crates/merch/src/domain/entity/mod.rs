//! Entity Module

pub mod account;
pub mod account_info;
pub mod inventory;
pub mod purchase;
pub mod transfer;

pub use account::{Account, NewAccount};
pub use account_info::{AccountInfo, CoinHistory};
pub use inventory::InventoryEntry;
pub use purchase::Purchase;
pub use transfer::{ReceivedCoins, SentCoins, Transfer};
