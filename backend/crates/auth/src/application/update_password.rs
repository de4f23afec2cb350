//! Update Password Use Case
//!
//! Replaces a signed-in user's password. Order matters: session first,
//! current-password proof second, policy third, and only then the store
//! write. Any failure on the way leaves the stored credential untouched.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::policy::PasswordPolicy;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Update password input
pub struct UpdatePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Update password use case
pub struct UpdatePasswordUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    policy: Arc<PasswordPolicy>,
    config: Arc<AuthConfig>,
}

impl<U, S> UpdatePasswordUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        policy: Arc<PasswordPolicy>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            policy,
            config,
        }
    }

    pub async fn execute(
        &self,
        session_token: &str,
        input: UpdatePasswordInput,
    ) -> AuthResult<()> {
        let session_id = token::parse(&self.config.session_secret, session_token)?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        // The user may have vanished between session creation and now;
        // that forces re-authentication rather than a 404.
        let user = self
            .user_repo
            .find_by_user_name(&session.user_name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let current_password = RawPassword::new(input.current_password);
        if !user
            .password_hash
            .verify(&current_password, self.config.pepper())
        {
            tracing::warn!(
                user_name = %session.user_name,
                "Password update rejected: current password incorrect"
            );
            return Err(AuthError::CurrentPasswordIncorrect);
        }

        let new_password = RawPassword::new(input.new_password);
        self.policy
            .evaluate(&new_password)
            .map_err(AuthError::PasswordRejected)?;

        let new_hash = UserPassword::from_raw(&new_password, self.config.pepper())?;

        self.user_repo
            .update_password(&session.user_name, &new_hash)
            .await?;

        tracing::info!(user_name = %session.user_name, "Password updated");

        Ok(())
    }
}
