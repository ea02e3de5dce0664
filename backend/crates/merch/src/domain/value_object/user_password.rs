//! Account password: the value typed at login and the hash stored with
//! the account.
//!
//! The first successful login fixes the password, so there is no minimum
//! length. Hashing and verification are slow (Argon2id); the
//! authentication flow runs both on a blocking thread.
//!
//! ```rust
//! use merch::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("hunter2".to_string()).unwrap();
//! let stored = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(stored.verify(&raw, None));
//! ```

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};

use crate::error::{MerchError, MerchResult};

fn policy_error(err: PasswordPolicyError) -> MerchError {
    let message = match err {
        PasswordPolicyError::EmptyOrWhitespace => "password is required".to_string(),
        PasswordPolicyError::TooLong { max, .. } => {
            format!("password must be at most {max} characters")
        }
        PasswordPolicyError::InvalidCharacter => "password contains invalid characters".to_string(),
    };
    MerchError::InvalidInput(message)
}

/// Password from an authentication request, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> MerchResult<Self> {
        ClearTextPassword::new(raw).map(Self).map_err(policy_error)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

/// Stored password hash (`users.password_hash`)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> MerchResult<Self> {
        raw.0.hash(pepper).map(Self).map_err(MerchError::from)
    }

    /// Load a hash read back from the ledger
    ///
    /// A hash that does not parse means the row is corrupt, not that the
    /// caller sent bad input.
    pub fn from_phc_string(phc_string: impl Into<String>) -> MerchResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| MerchError::Internal("stored password hash is unreadable".to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_error(raw: impl Into<String>) -> String {
        match RawPassword::new(raw.into()) {
            Err(MerchError::InvalidInput(message)) => message,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_policy_messages() {
        assert_eq!(input_error(""), "password is required");
        assert_eq!(input_error(" \t "), "password is required");
        assert_eq!(input_error("a".repeat(129)), "password must be at most 128 characters");
        assert_eq!(input_error("tab\u{0008}"), "password contains invalid characters");
        assert!(RawPassword::new("pw".to_string()).is_ok());
    }

    #[test]
    fn test_first_password_is_the_only_one() {
        let first = RawPassword::new("first".to_string()).unwrap();
        let stored = UserPassword::from_raw(&first, None).unwrap();

        let reloaded = UserPassword::from_phc_string(stored.as_phc_string()).unwrap();
        assert!(reloaded.verify(&first, None));
        assert!(!reloaded.verify(&RawPassword::new("second".to_string()).unwrap(), None));
    }

    #[test]
    fn test_corrupt_hash_is_internal() {
        assert!(matches!(
            UserPassword::from_phc_string("plaintext"),
            Err(MerchError::Internal(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("hunter2".to_string()).unwrap();
        assert_eq!(format!("{raw:?}"), "RawPassword([REDACTED])");
    }
}
