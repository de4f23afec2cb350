//! Session Entity
//!
//! Server-side record asserting that a client has authenticated as a
//! given user. Created only after a successful password verification for
//! a stored user (no orphan sessions); destroyed on sign-out.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_object::user_name::UserName;

/// Auth session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4); the token handed to the client is this ID
    /// plus an HMAC signature
    pub session_id: Uuid,
    /// The authenticated user
    pub user_name: UserName,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for an authenticated user
    pub fn new(user_name: UserName) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_name,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        let user = UserName::new("alice").unwrap();
        let a = Session::new(user.clone());
        let b = Session::new(user);
        assert_ne!(a.session_id, b.session_id);
    }
}
