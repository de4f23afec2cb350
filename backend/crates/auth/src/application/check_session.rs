//! Check Session Use Case
//!
//! Verifies a session token and retrieves the session. This is the gate
//! every protected operation goes through.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Verify the token signature, then look the session up
    pub async fn get_session(&self, session_token: &str) -> AuthResult<Session> {
        let session_id = token::parse(&self.config.session_secret, session_token)?;

        self.session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)
    }

    /// Just check if the session is valid (returns bool)
    pub async fn is_valid(&self, session_token: &str) -> bool {
        self.get_session(session_token).await.is_ok()
    }
}
