//! Item Name Value Object
//!
//! Identifier of a merch item in the catalog (`t-shirt`, `cup`, ...).
//! Taken verbatim from the request path; whether the item exists is a
//! catalog lookup, not a validation concern.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for item name (in characters)
pub const ITEM_NAME_MAX_LENGTH: usize = 64;

/// Error returned when item name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemNameError {
    Empty,
    TooLong { length: usize, max: usize },
    InvalidCharacter,
}

impl fmt::Display for ItemNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "item is required"),
            Self::TooLong { length, max } => {
                write!(f, "item name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter => {
                write!(f, "item name cannot contain whitespace or control characters")
            }
        }
    }
}

impl std::error::Error for ItemNameError {}

/// Validated item name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    pub fn new(input: impl Into<String>) -> Result<Self, ItemNameError> {
        let value = input.into();

        if value.is_empty() {
            return Err(ItemNameError::Empty);
        }
        let length = value.chars().count();
        if length > ITEM_NAME_MAX_LENGTH {
            return Err(ItemNameError::TooLong {
                length,
                max: ITEM_NAME_MAX_LENGTH,
            });
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ItemNameError::InvalidCharacter);
        }

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
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemName {
    type Error = ItemNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemName> for String {
    fn from(item: ItemName) -> Self {
        item.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_are_valid() {
        for item in ["t-shirt", "cup", "book", "pen", "powerbank", "pink-hoody"] {
            assert_eq!(ItemName::new(item).unwrap().as_str(), item);
        }
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(ItemName::new(""), Err(ItemNameError::Empty));
        assert_eq!(ItemName::new("pink hoody"), Err(ItemNameError::InvalidCharacter));
        assert_eq!(ItemName::new("cup\n"), Err(ItemNameError::InvalidCharacter));
        assert!(matches!(
            ItemName::new("x".repeat(ITEM_NAME_MAX_LENGTH + 1)),
            Err(ItemNameError::TooLong { .. })
        ));
    }
}
