//! Session persistence with a sliding expiry window.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use till_core::clock::Clock;
use till_core::config::SessionConfig;
use till_core::error::AppError;
use till_core::types::EmployeeId;
use till_database::SessionRepository;
use till_entity::session::{Session, SessionToken, SessionView};

use super::token::generate_token;

/// Creates, resolves and destroys sessions.
///
/// A session is valid while the clock reads strictly before its expiry and
/// its employee is active. Every successful [`resolve`](Self::resolve)
/// pushes the expiry to `now + ttl`. Expired rows are left in the table.
#[derive(Clone)]
pub struct SessionStore {
    repo: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    token_length: usize,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .field("token_length", &self.token_length)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates a session store.
    ///
    /// Fails if the configured window is empty or out of range.
    pub fn new(
        repo: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
        config: SessionConfig,
    ) -> Result<Self, AppError> {
        Ok(Self {
            repo,
            clock,
            ttl: config.ttl()?,
            token_length: config.effective_token_length(),
        })
    }

    /// Starts a new session for `employee_id` and returns its token.
    ///
    /// Does not check that the employee exists or is active; callers do
    /// that before asking for a session.
    pub async fn create(&self, employee_id: EmployeeId) -> Result<SessionToken, AppError> {
        let session = Session {
            token: generate_token(self.token_length),
            employee_id,
            expires_at: self.clock.now() + self.ttl,
        };

        self.repo.insert(&session).await?;

        info!(
            employee_id = %employee_id,
            expires_at = %session.expires_at,
            "Session created"
        );
        Ok(session.token)
    }

    /// Resolves a token to the signed-in employee, refreshing its expiry.
    ///
    /// Absent, empty, unknown and expired tokens, and tokens owned by an
    /// inactive employee, all resolve to [`SessionView::SignedOut`]. Store
    /// faults are returned as errors.
    pub async fn resolve(&self, token: Option<&SessionToken>) -> Result<SessionView, AppError> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(SessionView::SignedOut);
        };

        let now = self.clock.now();
        let Some(mut session) = self.repo.find_active(token, now).await? else {
            debug!("Session token did not resolve");
            return Ok(SessionView::SignedOut);
        };

        let expires_at = now + self.ttl;
        if !self.repo.update_expiry(token, expires_at).await? {
            // Destroyed between lookup and refresh.
            return Ok(SessionView::SignedOut);
        }
        session.expires_at = expires_at;

        Ok(SessionView::SignedIn(session))
    }

    /// Deletes a session. Unknown tokens are not an error.
    pub async fn destroy(&self, token: &SessionToken) -> Result<(), AppError> {
        if self.repo.delete(token).await? {
            info!("Session destroyed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use till_core::clock::ManualClock;
    use till_core::error::ErrorKind;
    use till_database::{EmployeeRepository, MemoryDatabase};
    use till_entity::employee::{CreateEmployee, TrustLevel};

    struct Fixture {
        db: MemoryDatabase,
        clock: Arc<ManualClock>,
        store: SessionStore,
        employee_id: EmployeeId,
    }

    async fn fixture() -> Fixture {
        let db = MemoryDatabase::new();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = SessionStore::new(db.sessions(), clock.clone(), SessionConfig::default()).unwrap();
        let employee = db
            .create(&CreateEmployee {
                username: "riley".to_string(),
                password_hash: "unused".to_string(),
                name: "Riley Shaw".to_string(),
                trust_level: TrustLevel::Manager,
            })
            .await
            .unwrap();
        Fixture {
            db,
            clock,
            store,
            employee_id: employee.id,
        }
    }

    #[tokio::test]
    async fn test_create_sets_expiry_and_token_length() {
        let f = fixture().await;
        let token = f.store.create(f.employee_id).await.unwrap();
        assert_eq!(token.len(), 128);

        let row = f.db.session_row(&token).await.unwrap();
        assert_eq!(row.expires_at, f.clock.now() + Duration::minutes(30));
    }

    #[tokio::test]
    async fn test_resolve_refreshes_expiry() {
        let f = fixture().await;
        let token = f.store.create(f.employee_id).await.unwrap();

        f.clock.advance(Duration::minutes(20));
        let view = f.store.resolve(Some(&token)).await.unwrap();
        let session = view.session().unwrap();
        assert_eq!(session.username, "riley");
        assert_eq!(session.trust_level, TrustLevel::Manager);
        assert_eq!(session.expires_at, f.clock.now() + Duration::minutes(30));

        let row = f.db.session_row(&token).await.unwrap();
        assert_eq!(row.expires_at, session.expires_at);
    }

    #[tokio::test]
    async fn test_resolve_at_exact_expiry_is_signed_out() {
        let f = fixture().await;
        let token = f.store.create(f.employee_id).await.unwrap();

        f.clock.advance(Duration::minutes(30));
        assert_eq!(
            f.store.resolve(Some(&token)).await.unwrap(),
            SessionView::SignedOut
        );
        assert_eq!(f.db.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_resolve_absent_or_empty_token() {
        let f = fixture().await;
        assert_eq!(f.store.resolve(None).await.unwrap(), SessionView::SignedOut);
        let empty = SessionToken::new("");
        assert_eq!(
            f.store.resolve(Some(&empty)).await.unwrap(),
            SessionView::SignedOut
        );
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let f = fixture().await;
        let token = f.store.create(f.employee_id).await.unwrap();
        f.store.destroy(&token).await.unwrap();
        f.store.destroy(&token).await.unwrap();
        assert_eq!(
            f.store.resolve(Some(&token)).await.unwrap(),
            SessionView::SignedOut
        );
    }

    #[tokio::test]
    async fn test_store_fault_propagates() {
        let f = fixture().await;
        let token = f.store.create(f.employee_id).await.unwrap();
        f.db.set_offline(true);
        let err = f.store.resolve(Some(&token)).await.unwrap_err();
        assert!(err.is_database());
    }

    #[tokio::test]
    async fn test_short_configured_token_length_is_clamped() {
        let f = fixture().await;
        let store = SessionStore::new(
            f.db.sessions(),
            f.clock.clone(),
            SessionConfig {
                ttl_minutes: 5,
                token_length: 10,
            },
        )
        .unwrap();
        let token = store.create(f.employee_id).await.unwrap();
        assert_eq!(token.len(), 64);
    }

    #[tokio::test]
    async fn test_unusable_ttl_is_rejected_at_construction() {
        let f = fixture().await;
        for ttl_minutes in [0, u64::MAX] {
            let err = SessionStore::new(
                f.db.sessions(),
                f.clock.clone(),
                SessionConfig {
                    ttl_minutes,
                    token_length: 128,
                },
            )
            .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration);
        }
        assert_eq!(f.db.session_count().await, 0);
    }
}
