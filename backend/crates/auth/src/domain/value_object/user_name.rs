//! User Name Value Object
//!
//! The user name is the login identifier. It is stored and compared
//! verbatim: case-sensitive, no canonical form, no Unicode normalization.
//! `Alice` and `alice` are two different users.
//!
//! ## Invariants
//! - Length: 3 to 30 characters
//! - No whitespace or control characters

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length for a user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for a user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("user name must be at least {USER_NAME_MIN_LENGTH} characters")]
    TooShort,

    #[error("user name must be at most {USER_NAME_MAX_LENGTH} characters")]
    TooLong,

    #[error("user name must not contain whitespace or control characters")]
    InvalidCharacter,
}

/// Validated user name, stored verbatim
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Validate and wrap a user name
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let raw = raw.into();
        let char_count = raw.chars().count();

        if char_count < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(raw))
    }

    /// View the user name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_name() {
        assert!(UserName::new("alice").is_ok());
        assert!(UserName::new("a_b").is_ok());
        assert!(UserName::new("a".repeat(30)).is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(UserName::new("ab").unwrap_err(), UserNameError::TooShort);
        assert_eq!(
            UserName::new("a".repeat(31)).unwrap_err(),
            UserNameError::TooLong
        );
    }

    #[test]
    fn test_rejects_whitespace_and_control() {
        assert_eq!(
            UserName::new("al ice").unwrap_err(),
            UserNameError::InvalidCharacter
        );
        assert_eq!(
            UserName::new("al\tice").unwrap_err(),
            UserNameError::InvalidCharacter
        );
    }

    #[test]
    fn test_case_sensitive() {
        let a = UserName::new("Alice").unwrap();
        let b = UserName::new("alice").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "Alice");
    }
}
