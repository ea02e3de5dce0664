//! Password Hashing and Verification
//!
//! Argon2id with fixed parameters (m=19456 KiB, t=2, p=1), stored as PHC
//! strings. An optional application-wide pepper is appended to the
//! password bytes before hashing. Clear text never outlives the value that
//! holds it: both the password and every peppered copy are zeroized on drop.
//!
//! Hashing is CPU-bound and blocking; async callers should run it on a
//! blocking thread.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Maximum password length in Unicode scalar values
pub const MAX_PASSWORD_LENGTH: usize = 128;

const ARGON2_M_COST: u32 = 19_456;
const ARGON2_T_COST: u32 = 2;
const ARGON2_P_COST: u32 = 1;

/// Rejected password input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("password is empty")]
    EmptyOrWhitespace,

    #[error("password contains control characters")]
    InvalidCharacter,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("stored password hash is not a valid PHC string")]
    InvalidHashFormat,
}

fn argon2id() -> Result<Argon2<'static>, PasswordHashError> {
    let params = Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, None)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Password as typed by the user, NFKC-normalized
///
/// Not `Clone`; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize and validate
    ///
    /// There is no minimum length: accounts are registered implicitly, so
    /// whatever is sent on first login becomes the password.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        let password = Self(normalized);

        if password.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let actual = password.0.chars().count();
        if actual > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual,
            });
        }

        if password.0.chars().any(char::is_control) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(Vec::with_capacity(
            self.0.len() + pepper.map_or(0, <[u8]>::len),
        ));
        bytes.extend_from_slice(self.0.as_bytes());
        bytes.extend_from_slice(pepper.unwrap_or_default());
        bytes
    }

    /// Hash with a fresh 128-bit salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2id()?
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Argon2id PHC string, safe to store
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("hunter2".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// assert!(hashed.as_phc_string().starts_with("$argon2id$"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Accept a stored hash after checking it parses
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Constant-time comparison of the derived key; parameters come from
    /// the stored hash
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        let Ok(argon2) = argon2id() else {
            return false;
        };
        argon2
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_policy() {
        assert!(ClearTextPassword::new("pw".to_string()).is_ok());
        assert!(ClearTextPassword::new("パスワード".to_string()).is_ok());

        for blank in ["", "   ", "\u{3000}"] {
            assert_eq!(
                ClearTextPassword::new(blank.to_string()).unwrap_err(),
                PasswordPolicyError::EmptyOrWhitespace
            );
        }
        assert_eq!(
            ClearTextPassword::new("pass\u{0007}word".to_string()).unwrap_err(),
            PasswordPolicyError::InvalidCharacter
        );
        assert!(matches!(
            ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(PasswordPolicyError::TooLong { actual: 129, .. })
        ));
    }

    #[test]
    fn test_nfkc_equivalent_inputs_verify() {
        // U+FF21 FULLWIDTH LATIN CAPITAL LETTER A normalizes to "A"
        let hashed = clear("\u{FF21}bc").hash(None).unwrap();
        assert!(hashed.verify(&clear("Abc"), None));
    }

    #[test]
    fn test_hash_and_verify_with_pepper() {
        let password = clear("correct horse");
        let hashed = password.hash(Some(b"pepper")).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(hashed.verify(&password, Some(b"pepper")));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&clear("battery staple"), Some(b"pepper")));

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, Some(b"pepper")));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(matches!(
            HashedPassword::from_phc_string("plaintext"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let debug = format!("{:?}", clear("secret"));
        assert_eq!(debug, "ClearTextPassword([REDACTED])");
    }
}
