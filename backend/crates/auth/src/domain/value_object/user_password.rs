//! User Password Value Objects
//!
//! Domain wrappers around `platform::password`. [`RawPassword`] carries
//! user input (zeroized on drop, redacted in Debug output); policy
//! validation is a separate step, see [`crate::domain::policy`].
//! [`UserPassword`] is the hashed form safe to persist.

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped. Any string is
/// representable, including the empty one; whether it is acceptable is
/// the policy engine's call.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Wrap a raw password
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    /// View the password for policy evaluation
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Stores the password in Argon2id PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from a raw password by hashing
    ///
    /// ## Arguments
    /// * `raw` - The raw password (already policy-checked by the caller)
    /// * `pepper` - Optional application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = raw.inner().hash(pepper)?;

        Ok(Self(hashed))
    }

    /// Create from a PHC string loaded from the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))?;

        Ok(Self(hashed))
    }

    /// Get the PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// ## Arguments
    /// * `raw` - The raw password to verify
    /// * `pepper` - Must match the pepper used during hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Check if the hash should be recomputed (algorithm drift)
    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let raw = RawPassword::new("Str0ng_Pass123".to_string());
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("Wr0ng_Pass123".to_string());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("Str0ng_Pass123".to_string());
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));
        assert!(!restored.needs_rehash());
    }

    #[test]
    fn test_invalid_phc_string_rejected() {
        assert!(UserPassword::from_phc_string("plaintext-left-over").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("secret".to_string());
        assert!(!format!("{:?}", raw).contains("secret"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2id"));
    }
}
