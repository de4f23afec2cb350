//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `auth::AuthError` / `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::domain::policy::PasswordPolicy;
use auth::middleware::{AuthMiddlewareState, require_session};
use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use platform::wordlist::CommonPasswordSet;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    // Bounded acquire timeout: a saturated pool surfaces as a retryable
    // 503, never as a hang or an authentication failure.
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Common-password denylist: loaded once, shared read-only
    let wordlist_path = env::var("COMMON_PASSWORDS_FILE")
        .unwrap_or_else(|_| "assets/common_passwords.txt".to_string());
    let common_passwords = Arc::new(CommonPasswordSet::load(&wordlist_path)?);

    tracing::info!(
        entries = common_passwords.len(),
        path = %wordlist_path,
        "Common-password list loaded"
    );

    let policy = PasswordPolicy::new(common_passwords);

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "SESSION_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            session_secret: secret,
            ..AuthConfig::default()
        }
    };

    let repo = PgAuthRepository::new(pool.clone());

    // Session gate for everything that is not sign-up/sign-in/status
    let gate = AuthMiddlewareState {
        repo: Arc::new(repo.clone()),
        config: Arc::new(auth_config.clone()),
    };

    let protected = Router::new()
        .route("/welcome", get(welcome))
        .route_layer(axum::middleware::from_fn_with_state(
            gate,
            require_session::<PgAuthRepository>,
        ));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40180,http://127.0.0.1:40180".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(repo, auth_config, policy))
        .nest("/api", protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31180));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Sample gated content route; only reachable with a valid session
async fn welcome() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome back",
        "serverTime": chrono::Utc::now().to_rfc3339(),
    }))
}
