//! Sign In Use Case
//!
//! Authenticates a user and creates a session.
//!
//! An unknown user and a wrong password yield the same
//! `InvalidCredentials` error; only the operational log records which
//! half failed, together with the client IP.

use std::net::IpAddr;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed session token for the cookie
    pub session_token: String,
    pub user_name: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        client_ip: Option<IpAddr>,
    ) -> AuthResult<SignInOutput> {
        // A name that cannot exist is treated exactly like an unknown one.
        let Ok(user_name) = UserName::new(input.user_name) else {
            tracing::warn!(client_ip = ?client_ip, "Failed sign-in attempt: malformed user name");
            return Err(AuthError::InvalidCredentials);
        };

        let user = self.user_repo.find_by_user_name(&user_name).await?;

        let Some(user) = user else {
            tracing::warn!(
                user_name = %user_name,
                client_ip = ?client_ip,
                "Failed sign-in attempt: unknown user"
            );
            return Err(AuthError::InvalidCredentials);
        };

        let raw_password = RawPassword::new(input.password);

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(
                user_name = %user_name,
                client_ip = ?client_ip,
                "Failed sign-in attempt: wrong password"
            );
            return Err(AuthError::InvalidCredentials);
        }

        // Session creation only happens for a user that exists in the
        // store right now; there is no other way in.
        let session = Session::new(user.user_name.clone());
        self.session_repo.create(&session).await?;

        let session_token = token::mint(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_name = %user.user_name,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            user_name: user.user_name.to_string(),
        })
    }
}
