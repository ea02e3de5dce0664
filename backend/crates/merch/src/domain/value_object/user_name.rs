//! User Name Value Object
//!
//! ユーザー名は、アカウントを識別する**唯一のキー**。
//! 初回ログイン時にそのまま登録され、以後変更されない。
//!
//! ## 設計方針
//! - 入力は正規化しない（大文字・小文字を区別する）
//! - トークンの `sub` クレームにもそのまま格納される
//!
//! ## 不変条件
//! - 長さ: 1〜64文字
//! - 空白・制御文字を含まない

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains whitespace
    ContainsWhitespace,

    /// User name contains a control character
    InvalidCharacter { position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username is required"),
            Self::TooLong { length, max } => {
                write!(f, "username is too long ({length} chars, maximum {max})")
            }
            Self::ContainsWhitespace => write!(f, "username cannot contain whitespace"),
            Self::InvalidCharacter { position } => {
                write!(f, "username contains a control character at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated user name
///
/// Equality is exact: `Alice` and `alice` are different accounts.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName from raw input
    pub fn new(input: impl Into<String>) -> Result<Self, UserNameError> {
        let value = input.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Create from database value (already validated on insert)
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(value: &str) -> Result<(), UserNameError> {
        if value.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = value.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if value.chars().any(char::is_whitespace) {
            return Err(UserNameError::ContainsWhitespace);
        }

        if let Some(position) = value.chars().position(char::is_control) {
            return Err(UserNameError::InvalidCharacter { position });
        }

        Ok(())
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserName {
    type Error = UserNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod validation {
        use super::*;

        #[test]
        fn test_valid_names() {
            for name in ["alice", "Bob", "user_42", "a", "dmitry.k", "пользователь"] {
                assert!(UserName::new(name).is_ok(), "{name}");
            }
        }

        #[test]
        fn test_empty_fails() {
            assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        }

        #[test]
        fn test_maximum_length() {
            assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        }

        #[test]
        fn test_too_long() {
            assert!(matches!(
                UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
                Err(UserNameError::TooLong { length: 65, max: 64 })
            ));
        }

        #[test]
        fn test_whitespace_fails() {
            assert_eq!(UserName::new(" alice"), Err(UserNameError::ContainsWhitespace));
            assert_eq!(UserName::new("al ice"), Err(UserNameError::ContainsWhitespace));
            assert_eq!(UserName::new("alice\t"), Err(UserNameError::ContainsWhitespace));
        }

        #[test]
        fn test_control_character_fails() {
            assert_eq!(
                UserName::new("ali\u{0007}ce"),
                Err(UserNameError::InvalidCharacter { position: 3 })
            );
        }
    }

    #[test]
    fn test_case_sensitive() {
        let upper = UserName::new("Alice").unwrap();
        let lower = UserName::new("alice").unwrap();
        assert_ne!(upper, lower);
        assert_eq!(upper.as_str(), "Alice");
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize() {
            let name = UserName::new("alice").unwrap();
            assert_eq!(serde_json::to_string(&name).unwrap(), "\"alice\"");
        }

        #[test]
        fn test_deserialize_invalid() {
            let result: Result<UserName, _> = serde_json::from_str("\"\"");
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_error_display() {
        let err = UserNameError::TooLong { length: 70, max: 64 };
        let msg = err.to_string();
        assert!(msg.contains("70") && msg.contains("64"));
    }
}
