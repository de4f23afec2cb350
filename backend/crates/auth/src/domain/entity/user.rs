//! User Record Entity
//!
//! One credential record per user name. Created on registration, mutated
//! only by password update, never deleted.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

/// Stored credential record
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique, case-sensitive login identifier
    pub user_name: UserName,
    /// Opaque PHC-format password hash
    pub password_hash: UserPassword,
    /// Stamped on registration and on every password update
    pub last_password_update: DateTime<Utc>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new record for registration
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_name,
            password_hash,
            last_password_update: now,
            created_at: now,
        }
    }

    /// Replace the stored hash and stamp the update time
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.last_password_update = Utc::now();
    }
}
