//! Session repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use till_core::error::{AppError, ErrorKind};
use till_core::result::AppResult;
use till_entity::session::{ActiveSession, Session, SessionToken};

use super::SessionRepository;

/// PostgreSQL-backed session repository.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn insert(&self, session: &Session) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sessions (session_token, employee_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(&session.token)
        .bind(session.employee_id)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))?;

        Ok(())
    }

    async fn find_active(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ActiveSession>> {
        sqlx::query_as::<_, ActiveSession>(
            "SELECT s.session_token, s.employee_id, e.username, e.name, e.trust_level, s.expires_at \
             FROM sessions s \
             JOIN employees e ON e.employee_id = s.employee_id \
             WHERE s.session_token = $1 AND e.active = TRUE AND $2 < s.expires_at",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up session", e))
    }

    async fn update_expiry(
        &self,
        token: &SessionToken,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE sessions SET expires_at = $2 WHERE session_token = $1")
            .bind(token)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to refresh session", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, token: &SessionToken) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
