//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::MerchAppState;
pub use middleware::{AuthenticatedUser, require_bearer};
pub use router::{merch_router, merch_router_generic};
