//! Repository traits and their PostgreSQL implementations.
//!
//! The auth layer only ever sees `Arc<dyn EmployeeRepository>` and
//! `Arc<dyn SessionRepository>`, injected at construction. Each method is a
//! single-row statement; none of them open a transaction.

pub mod employee;
pub mod session;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use till_core::result::AppResult;
use till_core::types::EmployeeId;
use till_entity::employee::{CreateEmployee, Employee};
use till_entity::session::{ActiveSession, Session, SessionToken};

pub use employee::PgEmployeeRepository;
pub use session::PgSessionRepository;

/// Persistence for employee rows. Knows nothing about sessions.
#[async_trait]
pub trait EmployeeRepository: Send + Sync + 'static {
    /// Find an employee by primary key, active or not.
    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<Employee>>;

    /// Find an active employee by exact username.
    async fn find_active_by_username(&self, username: &str) -> AppResult<Option<Employee>>;

    /// Whether any employee, active or deactivated, holds `username`.
    async fn username_exists(&self, username: &str) -> AppResult<bool>;

    /// Insert a new active employee.
    ///
    /// Fails with a `Conflict` error if the username is already taken.
    async fn create(&self, data: &CreateEmployee) -> AppResult<Employee>;

    /// Replace an employee's password hash. Returns `false` if no row matched.
    async fn update_password(&self, id: EmployeeId, password_hash: &str) -> AppResult<bool>;

    /// Clear the active flag. Returns `false` if no active row matched.
    async fn deactivate(&self, id: EmployeeId) -> AppResult<bool>;

    /// All active employees ordered by username.
    async fn list_active(&self) -> AppResult<Vec<Employee>>;
}

/// Persistence for session rows.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Insert a new session row.
    async fn insert(&self, session: &Session) -> AppResult<()>;

    /// Look up a session joined to its owning employee.
    ///
    /// Returns `None` unless the token exists, `now` is strictly before the
    /// stored expiry, and the employee is active.
    async fn find_active(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ActiveSession>>;

    /// Set a session's expiry. Returns `false` if the token is unknown.
    async fn update_expiry(
        &self,
        token: &SessionToken,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Delete a session. Returns `false` if the token was unknown.
    async fn delete(&self, token: &SessionToken) -> AppResult<bool>;
}
