//! Merch Shop Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, entities, Ledger Store traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and in-memory Ledger Stores
//! - `presentation/` - HTTP handlers, DTOs, bearer middleware, router
//!
//! ## Features
//! - Sign-in with username + password; first login provisions the account
//! - Stateless HS256 bearer tokens (12 hour lifetime)
//! - Buying merch for coins
//! - Sending coins to other users
//! - Balance, inventory and transfer history in one view
//!
//! ## Consistency Model
//! - Every balance change is a guarded, atomic store operation
//! - Buy and send run in one transaction each; any failure rolls back
//! - The info view reads its parts independently

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::MerchConfig;
pub use error::{MerchError, MerchResult};
pub use infra::{memory::InMemoryLedgerStore, postgres::PgLedgerStore};
pub use presentation::router::{merch_router, merch_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::domain::repository::{LedgerStore, LedgerTransaction};
    pub use crate::infra::memory::InMemoryLedgerStore as MemoryStore;
    pub use crate::infra::postgres::PgLedgerStore as LedgerDb;
}
