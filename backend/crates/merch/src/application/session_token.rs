//! Session Token Service
//!
//! Issues and verifies the stateless bearer tokens that carry the
//! authenticated user name. Signing uses the secret injected through
//! [`MerchConfig`]; there is no server-side session store.

use chrono::Utc;
use platform::token::{Claims, TokenSigner};

use crate::application::config::MerchConfig;
use crate::domain::value_object::UserName;
use crate::error::{MerchError, MerchResult};

/// Session token issuer/verifier
#[derive(Debug, Clone)]
pub struct SessionTokenService {
    signer: TokenSigner,
    ttl_secs: i64,
}

impl SessionTokenService {
    pub fn new(config: &MerchConfig) -> Self {
        Self {
            signer: TokenSigner::new(&config.token_secret),
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Issue a token for `user_name`, expiring after the configured TTL
    pub fn issue(&self, user_name: &UserName) -> MerchResult<String> {
        self.issue_at(user_name, Utc::now().timestamp())
    }

    pub fn issue_at(&self, user_name: &UserName, now: i64) -> MerchResult<String> {
        let claims = Claims::new(user_name.as_str(), now, self.ttl_secs);
        self.signer
            .sign(&claims)
            .map_err(|e| MerchError::Internal(e.to_string()))
    }

    /// Verify a token and return the user name it asserts
    ///
    /// Bad signature, expiry and a missing subject all collapse into
    /// `InvalidToken`.
    pub fn verify(&self, token: &str) -> MerchResult<UserName> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> MerchResult<UserName> {
        let claims = self.signer.verify_at(token, now).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            MerchError::InvalidToken
        })?;

        UserName::new(claims.sub).map_err(|e| {
            tracing::debug!(error = %e, "Token subject is not a valid user name");
            MerchError::InvalidToken
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn service() -> SessionTokenService {
        SessionTokenService::new(&MerchConfig::development())
    }

    fn alice() -> UserName {
        UserName::new("alice").unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();
        let token = service.issue_at(&alice(), NOW).unwrap();
        assert_eq!(service.verify_at(&token, NOW + 1).unwrap(), alice());
    }

    #[test]
    fn test_token_expires_after_twelve_hours() {
        let service = service();
        let token = service.issue_at(&alice(), NOW).unwrap();

        assert!(service.verify_at(&token, NOW + 12 * 3600 - 1).is_ok());
        assert!(matches!(
            service.verify_at(&token, NOW + 12 * 3600),
            Err(MerchError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let token = service().issue_at(&alice(), NOW).unwrap();
        assert!(matches!(
            service().verify_at(&token, NOW),
            Err(MerchError::InvalidToken)
        ));
    }

    #[test]
    fn test_issue_uses_current_time() {
        let service = service();
        let token = service.issue(&alice()).unwrap();
        assert_eq!(service.verify(&token).unwrap(), alice());
    }
}
