//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::extract_client_ip;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
    UpdatePasswordInput, UpdatePasswordUseCase,
};
use crate::domain::policy::PasswordPolicy;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    SessionStatusResponse, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse,
    UpdatePasswordRequest, UserInfoResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub policy: Arc<PasswordPolicy>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.policy.clone(), state.config.clone());

    let user_name = req.user_name.clone();

    let input = SignUpInput {
        user_name: req.user_name,
        password: req.password,
    };

    use_case.execute(input).await?;

    // Login-ready, but deliberately not signed in
    Ok((StatusCode::CREATED, Json(SignUpResponse { user_name })))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));

    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignInInput {
        user_name: req.user_name,
        password: req.password,
    };

    let output = use_case.execute(input, client_ip).await?;

    let cookie = state.config.cookie().build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            user_name: output.user_name,
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /signout
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // A stale or garbage token still gets its cookie cleared
        let _ = use_case.execute(&token).await;
    }

    let cookie = state.config.cookie().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session = if let Some(token) = token {
        use_case.get_session(&token).await.ok()
    } else {
        None
    };

    match session {
        Some(session) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            user_name: Some(session.user_name.to_string()),
        })),
        None => Ok(Json(SessionStatusResponse {
            authenticated: false,
            user_name: None,
        })),
    }
}

// ============================================================================
// Password Update (requires authentication)
// ============================================================================

/// POST /password
pub async fn update_password<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<UpdatePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name)
        .ok_or(AuthError::SessionInvalid)?;

    let use_case = UpdatePasswordUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.policy.clone(),
        state.config.clone(),
    );

    let input = UpdatePasswordInput {
        current_password: req.current_password,
        new_password: req.new_password,
    };

    use_case.execute(&token, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /me
pub async fn current_user<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserInfoResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name)
        .ok_or(AuthError::SessionInvalid)?;

    let check_use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let session = check_use_case.get_session(&token).await?;

    let user = state
        .repo
        .find_by_user_name(&session.user_name)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserInfoResponse {
        user_name: user.user_name.to_string(),
        last_password_update: user.last_password_update,
        created_at: user.created_at,
    }))
}
