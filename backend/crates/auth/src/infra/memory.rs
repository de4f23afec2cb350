//! In-Memory Repository Implementation
//!
//! Injectable store for tests and local development. A single mutex
//! guards both maps, so `create` is check-and-insert under one lock and
//! keeps the exactly-one-winner guarantee of the PostgreSQL
//! implementation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::domain::entity::{session::Session, user::UserRecord};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    sessions: HashMap<Uuid, Session>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &UserRecord) -> AuthResult<()> {
        let mut inner = self.lock();

        match inner.users.entry(user.user_name.as_str().to_string()) {
            Entry::Occupied(_) => Err(AuthError::UserNameTaken),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<UserRecord>> {
        let inner = self.lock();
        Ok(inner.users.get(user_name.as_str()).cloned())
    }

    async fn update_password(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> AuthResult<()> {
        let mut inner = self.lock();

        let user = inner
            .users
            .get_mut(user_name.as_str())
            .ok_or(AuthError::UserNotFound)?;

        user.set_password(password_hash.clone());
        Ok(())
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let mut inner = self.lock();
        inner.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        let inner = self.lock();
        Ok(inner.sessions.get(&session_id).cloned())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        let mut inner = self.lock();
        inner.sessions.remove(&session_id);
        Ok(())
    }
}
