//! Domain Layer
//!
//! Contains entities, value objects, and the Ledger Store traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Account, AccountInfo, NewAccount};
pub use repository::{LedgerStore, LedgerTransaction};
