//! Infrastructure Layer
//!
//! Ledger Store implementations: PostgreSQL for the service, an in-memory
//! store for tests and local experiments.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryLedgerStore;
pub use postgres::{PgLedgerStore, PgLedgerTransaction};
