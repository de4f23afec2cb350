//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Caller-facing messages follow a strict policy: authentication failures
//! are generic and identical across causes, policy failures are itemized,
//! and infrastructure failures say "try again later". The distinguishing
//! detail goes to the operational log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::policy::PolicyViolation;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Candidate password violated one or more policy rules
    #[error("Password does not meet the requirements")]
    PasswordRejected(Vec<PolicyViolation>),

    /// User name failed validation at registration
    #[error("Invalid user name: {0}")]
    InvalidUserName(String),

    /// User name already exists
    #[error("User name already taken")]
    UserNameTaken,

    /// Invalid credentials (unknown user or wrong password; deliberately
    /// not distinguished)
    #[error("Invalid user name or password")]
    InvalidCredentials,

    /// Current password check failed during a password update
    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    /// Session token missing, malformed, tampered, or signed out
    #[error("Session not found or signed out")]
    SessionInvalid,

    /// User vanished between session check and use
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::PasswordRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::InvalidUserName(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNameTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::CurrentPasswordIncorrect
            | AuthError::SessionInvalid
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::PasswordRejected(_) => ErrorKind::UnprocessableEntity,
            AuthError::InvalidUserName(_) => ErrorKind::BadRequest,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::CurrentPasswordIncorrect
            | AuthError::SessionInvalid
            | AuthError::UserNotFound => ErrorKind::Unauthorized,
            AuthError::Database(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError with the caller-facing message
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::PasswordRejected(violations) => {
                let reasons = violations
                    .iter()
                    .map(|v| format!("Password {}", v))
                    .collect::<Vec<_>>()
                    .join("; ");
                AppError::unprocessable(reasons)
                    .with_action("Please choose a password that satisfies all requirements")
            }
            // The user vanished mid-session; from the caller's point of
            // view the session is simply no longer valid.
            AuthError::UserNotFound => AppError::unauthorized("Session is no longer valid")
                .with_action("Please sign in again"),
            AuthError::Database(_) => {
                AppError::service_unavailable("Service temporarily unavailable")
                    .with_action("Please try again later")
            }
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with the appropriate level and detail
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            AuthError::CurrentPasswordIncorrect => {
                tracing::warn!("Password update with wrong current password");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_map_to_unauthorized() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::UserNotFound.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_database_error_is_generic_and_retryable() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 503);
        assert!(!app.message().contains("pool"));
        assert_eq!(app.action(), Some("Please try again later"));
    }

    #[test]
    fn test_policy_rejection_itemizes_reasons() {
        let err = AuthError::PasswordRejected(vec![
            PolicyViolation::TooShort { min: 12, actual: 5 },
            PolicyViolation::MissingDigit,
        ]);
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 422);
        assert!(app.message().contains("at least 12 characters"));
        assert!(app.message().contains("digit"));
    }
}
