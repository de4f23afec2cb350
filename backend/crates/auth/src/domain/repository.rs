//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer: PostgreSQL for production, in-memory for tests.

use uuid::Uuid;

use crate::domain::entity::{session::Session, user::UserRecord};
use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};
use crate::error::AuthResult;

/// Credential store trait
///
/// Uniqueness of `user_name` is the implementation's responsibility and
/// must hold under concurrent `create` calls: exactly one succeeds, the
/// rest fail with `UserNameTaken`. A check-then-insert at this layer
/// would be racy, so there isn't one.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new credential record; atomic, `UserNameTaken` on conflict
    async fn create(&self, user: &UserRecord) -> AuthResult<()>;

    /// Find a record by user name (exact, case-sensitive)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<UserRecord>>;

    /// Replace the stored hash, stamping `last_password_update` to now
    ///
    /// `UserNotFound` when the record vanished. Concurrent updates to the
    /// same user serialize at the storage layer.
    async fn update_password(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> AuthResult<()>;
}

/// Session store trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find a session by ID
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<Session>>;

    /// Delete a session (sign-out); deleting a missing session is a no-op
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;
}
