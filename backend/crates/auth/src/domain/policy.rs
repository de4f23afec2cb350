//! Password Policy Engine
//!
//! Evaluates a candidate password against the complexity rules and the
//! common-password denylist. Every violated rule is reported; the HTTP
//! layer itemizes them for the caller.
//!
//! Comparison is char-exact: no case folding, no Unicode normalization
//! (documented limitation). The special-character set is deliberately
//! restricted to `_`, `@`, `$`.

use std::sync::Arc;

use platform::wordlist::CommonPasswordSet;
use thiserror::Error;

use crate::domain::value_object::user_password::RawPassword;

/// Minimum password length (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Accepted special characters
pub const SPECIAL_CHARS: &[char] = &['_', '@', '$'];

/// A single violated policy rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("must contain at least one digit")]
    MissingDigit,

    #[error("must contain at least one special character (_, @, $)")]
    MissingSpecial,

    #[error("is too common, please choose a different one")]
    CommonPassword,
}

/// Password policy engine
///
/// Holds the shared common-password set; evaluation itself is pure and
/// lock-free.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    common_passwords: Arc<CommonPasswordSet>,
}

impl PasswordPolicy {
    pub fn new(common_passwords: Arc<CommonPasswordSet>) -> Self {
        Self { common_passwords }
    }

    /// Evaluate a candidate password, collecting every violated rule
    ///
    /// An empty password fails the length rule like any other short
    /// password. Each violation is also recorded in the operational log.
    pub fn evaluate(&self, password: &RawPassword) -> Result<(), Vec<PolicyViolation>> {
        let candidate = password.as_str();
        let mut violations = Vec::new();

        let char_count = candidate.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            violations.push(PolicyViolation::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
            violations.push(PolicyViolation::MissingLowercase);
        }
        if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PolicyViolation::MissingUppercase);
        }
        if !candidate.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PolicyViolation::MissingDigit);
        }
        if !candidate.chars().any(|c| SPECIAL_CHARS.contains(&c)) {
            violations.push(PolicyViolation::MissingSpecial);
        }

        if self.common_passwords.contains(candidate) {
            violations.push(PolicyViolation::CommonPassword);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            for violation in &violations {
                tracing::warn!(rule = %violation, "Password rejected by policy");
            }
            Err(violations)
        }
    }
}
