//! Wiring for the auth and service stack.

use std::sync::Arc;

use till_auth::{AccessGuard, Authenticator, CredentialStore, PasswordHasher, SessionStore};
use till_core::clock::Clock;
use till_core::config::{AuthConfig, SessionConfig};
use till_core::error::AppError;
use till_database::{EmployeeRepository, SessionRepository};

use crate::employee::EmployeeService;

/// Every component built once and shared by reference.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Employee credentials.
    pub credentials: Arc<CredentialStore>,
    /// Session lifecycle.
    pub sessions: Arc<SessionStore>,
    /// Login, logout and password change.
    pub authenticator: Arc<Authenticator>,
    /// Session resolution and trust-level checks.
    pub guard: Arc<AccessGuard>,
    /// Guarded employee administration.
    pub employees: EmployeeService,
}

impl ServiceContext {
    /// Builds the stack over the given repositories.
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        session_repo: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
        auth: &AuthConfig,
        session: SessionConfig,
    ) -> Result<Self, AppError> {
        let hasher = PasswordHasher::new(auth)?;
        let credentials = Arc::new(CredentialStore::new(employee_repo, hasher));
        let sessions = Arc::new(SessionStore::new(session_repo, clock, session)?);
        let authenticator = Arc::new(Authenticator::new(credentials.clone(), sessions.clone()));
        let guard = Arc::new(AccessGuard::new(sessions.clone()));
        let employees =
            EmployeeService::new(guard.clone(), authenticator.clone(), credentials.clone());

        Ok(Self {
            credentials,
            sessions,
            authenticator,
            guard,
            employees,
        })
    }
}
