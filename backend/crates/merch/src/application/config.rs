//! Application Configuration
//!
//! Configuration for the Merch application layer. The binary builds this
//! from environment variables; tests use [`MerchConfig::development`].

use std::time::Duration;

use platform::crypto::{SECRET_LEN, random_secret};

use crate::domain::value_object::Coins;

/// Merch application configuration
#[derive(Clone)]
pub struct MerchConfig {
    /// Token signing secret for HMAC-SHA256 (32 bytes)
    pub token_secret: [u8; SECRET_LEN],
    /// Token lifetime (12 hours)
    pub token_ttl: Duration,
    /// Balance given to accounts provisioned on first login
    pub starting_balance: u32,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for MerchConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; SECRET_LEN],
            token_ttl: Duration::from_secs(12 * 3600), // 12 hours
            starting_balance: 0,
            password_pepper: None,
        }
    }
}

impl MerchConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Set the balance for newly provisioned accounts
    pub fn with_starting_balance(mut self, coins: u32) -> Self {
        self.starting_balance = coins;
        self
    }

    /// Token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    pub fn starting_balance(&self) -> Coins {
        Coins::new(self.starting_balance)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for MerchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("starting_balance", &self.starting_balance)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MerchConfig::default();
        assert_eq!(config.token_ttl_secs(), 43_200);
        assert_eq!(config.starting_balance(), Coins::ZERO);
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_development_uses_random_secret() {
        let a = MerchConfig::development();
        let b = MerchConfig::development();
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_debug_redaction() {
        let config = MerchConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..MerchConfig::with_random_secret()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("pepper\""));
    }
}
