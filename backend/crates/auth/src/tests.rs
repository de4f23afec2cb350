//! Scenario tests for the auth crate
//!
//! Run the full use cases against the in-memory repository.

use std::sync::Arc;

use platform::wordlist::CommonPasswordSet;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
    UpdatePasswordInput, UpdatePasswordUseCase,
};
use crate::domain::policy::{PasswordPolicy, PolicyViolation};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthError;
use crate::infra::memory::InMemoryAuthRepository;

struct Fixture {
    repo: Arc<InMemoryAuthRepository>,
    config: Arc<AuthConfig>,
    policy: Arc<PasswordPolicy>,
}

impl Fixture {
    fn new() -> Self {
        let common = CommonPasswordSet::from_lines(["Common_Pass123", "letmein", "password123"]);

        Self {
            repo: Arc::new(InMemoryAuthRepository::new()),
            config: Arc::new(AuthConfig::with_random_secret()),
            policy: Arc::new(PasswordPolicy::new(Arc::new(common))),
        }
    }

    fn sign_up(&self) -> SignUpUseCase<InMemoryAuthRepository> {
        SignUpUseCase::new(self.repo.clone(), self.policy.clone(), self.config.clone())
    }

    fn sign_in(&self) -> SignInUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        SignInUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone())
    }

    fn sign_out(&self) -> SignOutUseCase<InMemoryAuthRepository> {
        SignOutUseCase::new(self.repo.clone(), self.config.clone())
    }

    fn check_session(&self) -> CheckSessionUseCase<InMemoryAuthRepository> {
        CheckSessionUseCase::new(self.repo.clone(), self.config.clone())
    }

    fn update_password(
        &self,
    ) -> UpdatePasswordUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        UpdatePasswordUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.policy.clone(),
            self.config.clone(),
        )
    }

    async fn register(&self, user_name: &str, password: &str) -> Result<(), AuthError> {
        self.sign_up()
            .execute(SignUpInput {
                user_name: user_name.to_string(),
                password: password.to_string(),
            })
            .await
    }

    async fn login(&self, user_name: &str, password: &str) -> Result<String, AuthError> {
        self.sign_in()
            .execute(
                SignInInput {
                    user_name: user_name.to_string(),
                    password: password.to_string(),
                },
                None,
            )
            .await
            .map(|output| output.session_token)
    }
}

mod registration_tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_user_name_fails_and_keeps_first_record() {
        let fx = Fixture::new();

        fx.register("alice", "Str0ng_Pass123").await.unwrap();
        let second = fx.register("alice", "Other_Pass4567").await;
        assert!(matches!(second, Err(AuthError::UserNameTaken)));

        // The stored record is still the first one
        assert!(fx.login("alice", "Str0ng_Pass123").await.is_ok());
        assert!(matches!(
            fx.login("alice", "Other_Pass4567").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn short_password_is_rejected_citing_length() {
        let fx = Fixture::new();

        let result = fx.register("alice", "short").await;
        let Err(AuthError::PasswordRejected(violations)) = result else {
            panic!("expected PasswordRejected");
        };
        assert!(violations.contains(&PolicyViolation::TooShort { min: 12, actual: 5 }));

        // Nothing was stored
        assert!(matches!(
            fx.login("alice", "short").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn common_password_is_rejected() {
        let fx = Fixture::new();

        let result = fx.register("alice", "Common_Pass123").await;
        let Err(AuthError::PasswordRejected(violations)) = result else {
            panic!("expected PasswordRejected");
        };
        assert_eq!(violations, vec![PolicyViolation::CommonPassword]);
    }

    #[tokio::test]
    async fn user_names_are_case_sensitive() {
        let fx = Fixture::new();

        fx.register("alice", "Str0ng_Pass123").await.unwrap();
        fx.register("Alice", "Str0ng_Pass123").await.unwrap();

        assert!(fx.login("Alice", "Str0ng_Pass123").await.is_ok());
    }
}

mod sign_in_tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let fx = Fixture::new();
        fx.register("alice", "Str0ng_Pass123").await.unwrap();

        let unknown_user = fx.login("nobody", "Str0ng_Pass123").await.unwrap_err();
        let wrong_password = fx.login("alice", "Wr0ng_Pass1234").await.unwrap_err();

        // Identical caller-facing failure, down to the message
        assert_eq!(
            unknown_user.to_app_error().message(),
            wrong_password.to_app_error().message()
        );
        assert_eq!(
            unknown_user.to_app_error().status_code(),
            wrong_password.to_app_error().status_code()
        );
    }

    #[tokio::test]
    async fn successful_sign_in_yields_a_valid_session() {
        let fx = Fixture::new();
        fx.register("alice", "Str0ng_Pass123").await.unwrap();

        let token = fx.login("alice", "Str0ng_Pass123").await.unwrap();

        let session = fx.check_session().get_session(&token).await.unwrap();
        assert_eq!(session.user_name, UserName::new("alice").unwrap());
    }

    #[tokio::test]
    async fn sign_out_invalidates_the_session() {
        let fx = Fixture::new();
        fx.register("alice", "Str0ng_Pass123").await.unwrap();

        let token = fx.login("alice", "Str0ng_Pass123").await.unwrap();
        assert!(fx.check_session().is_valid(&token).await);

        fx.sign_out().execute(&token).await.unwrap();
        assert!(!fx.check_session().is_valid(&token).await);
    }

    #[tokio::test]
    async fn garbage_tokens_never_validate() {
        let fx = Fixture::new();

        let check = fx.check_session();
        assert!(!check.is_valid("").await);
        assert!(!check.is_valid("garbage").await);
        assert!(!check.is_valid("aaaa.bbbb").await);
    }
}

mod update_password_tests {
    use super::*;

    #[tokio::test]
    async fn full_lifecycle_register_sign_in_update_re_sign_in() {
        let fx = Fixture::new();

        fx.register("alice", "Str0ng_Pass123").await.unwrap();
        let token = fx.login("alice", "Str0ng_Pass123").await.unwrap();

        fx.update_password()
            .execute(
                &token,
                UpdatePasswordInput {
                    current_password: "Str0ng_Pass123".to_string(),
                    new_password: "NewStr0ng_Pass456".to_string(),
                },
            )
            .await
            .unwrap();

        // Old password no longer signs in; the new one does
        assert!(matches!(
            fx.login("alice", "Str0ng_Pass123").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(fx.login("alice", "NewStr0ng_Pass456").await.is_ok());
    }

    #[tokio::test]
    async fn requires_a_valid_session() {
        let fx = Fixture::new();
        fx.register("alice", "Str0ng_Pass123").await.unwrap();

        let result = fx
            .update_password()
            .execute(
                "forged.token",
                UpdatePasswordInput {
                    current_password: "Str0ng_Pass123".to_string(),
                    new_password: "NewStr0ng_Pass456".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AuthError::SessionInvalid)));
    }

    #[tokio::test]
    async fn wrong_current_password_leaves_credential_untouched() {
        let fx = Fixture::new();
        fx.register("alice", "Str0ng_Pass123").await.unwrap();
        let token = fx.login("alice", "Str0ng_Pass123").await.unwrap();

        let result = fx
            .update_password()
            .execute(
                &token,
                UpdatePasswordInput {
                    current_password: "Wr0ng_Pass1234".to_string(),
                    new_password: "NewStr0ng_Pass456".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AuthError::CurrentPasswordIncorrect)));
        assert!(fx.login("alice", "Str0ng_Pass123").await.is_ok());
    }

    #[tokio::test]
    async fn common_new_password_leaves_credential_untouched() {
        let fx = Fixture::new();
        fx.register("alice", "Str0ng_Pass123").await.unwrap();
        let token = fx.login("alice", "Str0ng_Pass123").await.unwrap();

        let result = fx
            .update_password()
            .execute(
                &token,
                UpdatePasswordInput {
                    current_password: "Str0ng_Pass123".to_string(),
                    new_password: "Common_Pass123".to_string(),
                },
            )
            .await;

        let Err(AuthError::PasswordRejected(violations)) = result else {
            panic!("expected PasswordRejected");
        };
        assert!(violations.contains(&PolicyViolation::CommonPassword));

        // The stored hash did not change
        assert!(fx.login("alice", "Str0ng_Pass123").await.is_ok());
        assert!(matches!(
            fx.login("alice", "Common_Pass123").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn update_stamps_last_password_update() {
        let fx = Fixture::new();
        fx.register("alice", "Str0ng_Pass123").await.unwrap();
        let token = fx.login("alice", "Str0ng_Pass123").await.unwrap();

        let name = UserName::new("alice").unwrap();
        let before = {
            use crate::domain::repository::UserRepository;
            fx.repo.find_by_user_name(&name).await.unwrap().unwrap()
        };

        fx.update_password()
            .execute(
                &token,
                UpdatePasswordInput {
                    current_password: "Str0ng_Pass123".to_string(),
                    new_password: "NewStr0ng_Pass456".to_string(),
                },
            )
            .await
            .unwrap();

        let after = {
            use crate::domain::repository::UserRepository;
            fx.repo.find_by_user_name(&name).await.unwrap().unwrap()
        };

        assert!(after.last_password_update > before.last_password_update);
        assert_eq!(after.created_at, before.created_at);
    }
}
