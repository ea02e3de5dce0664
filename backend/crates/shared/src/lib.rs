//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Error classification mapped to HTTP status classes
//! - The unified [`error::app_error::AppError`] and its result alias
//! - Database error classification and the HTTP rendering (feature-gated)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
