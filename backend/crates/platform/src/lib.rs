//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64, signing secrets)
//! - Password hashing (Argon2id)
//! - Signed, time-limited bearer tokens (HS256)

pub mod crypto;
pub mod password;
pub mod token;
