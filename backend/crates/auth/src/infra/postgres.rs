//! PostgreSQL Repository Implementations
//!
//! Uniqueness and write serialization both come from the database: the
//! primary key on `users.user_name` makes concurrent same-name inserts
//! resolve to exactly one winner, and single-statement UPDATEs take the
//! row lock, so two concurrent password updates never interleave.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::UserRecord};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &UserRecord) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_name,
                password_hash,
                last_password_update,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.user_name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.last_password_update)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::UserNameTaken;
                }
            }
            AuthError::Database(e)
        })?;

        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_name,
                password_hash,
                last_password_update,
                created_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn update_password(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> AuthResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                last_password_update = $3
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .bind(password_hash.as_phc_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_name,
                created_at
            ) VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_name.as_str())
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_name,
                created_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_name: String,
    password_hash: String,
    last_password_update: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> AuthResult<UserRecord> {
        let user_name = UserName::new(self.user_name)
            .map_err(|e| AuthError::Internal(format!("Invalid user name in database: {e}")))?;
        let password_hash = UserPassword::from_phc_string(self.password_hash)?;

        Ok(UserRecord {
            user_name,
            password_hash,
            last_password_update: self.last_password_update,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_name: String,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<Session> {
        let user_name = UserName::new(self.user_name)
            .map_err(|e| AuthError::Internal(format!("Invalid user name in database: {e}")))?;

        Ok(Session {
            session_id: self.session_id,
            user_name,
            created_at: self.created_at,
        })
    }
}
