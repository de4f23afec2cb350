//! Sign Up Use Case
//!
//! Creates a new credential record. The user is login-ready afterwards
//! but not signed in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::UserRecord;
use crate::domain::policy::PasswordPolicy;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    policy: Arc<PasswordPolicy>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, policy: Arc<PasswordPolicy>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            policy,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<()> {
        let user_name = UserName::new(input.user_name)
            .map_err(|e| AuthError::InvalidUserName(e.to_string()))?;

        // Policy runs before hashing; a rejected password never reaches
        // the hasher.
        let raw_password = RawPassword::new(input.password);
        self.policy
            .evaluate(&raw_password)
            .map_err(AuthError::PasswordRejected)?;

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = UserRecord::new(user_name, password_hash);

        // Uniqueness is enforced by the store; a duplicate surfaces as
        // UserNameTaken without revealing that hashing already happened.
        self.user_repo.create(&user).await?;

        tracing::info!(user_name = %user.user_name, "New user registered");

        Ok(())
    }
}
