//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};

use till_auth::{
    AccessGuard, Authenticator, CredentialStore, EmployeeCreation, NewEmployee, PasswordHasher,
    SessionStore,
};
use till_core::ManualClock;
use till_core::config::{AuthConfig, SessionConfig};
use till_database::MemoryDatabase;
use till_entity::employee::{Employee, TrustLevel};

/// Fully wired auth stack over the in-memory store.
pub struct TestApp {
    /// Backing store, for direct inspection
    pub db: MemoryDatabase,
    /// Clock shared by the session store
    pub clock: Arc<ManualClock>,
    pub credentials: Arc<CredentialStore>,
    pub sessions: Arc<SessionStore>,
    pub authenticator: Authenticator,
    pub guard: AccessGuard,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let db = MemoryDatabase::new();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let hasher = PasswordHasher::new(&AuthConfig {
            argon2_memory_kib: 256,
            argon2_iterations: 1,
            argon2_parallelism: 1,
        })
        .expect("valid test argon2 params");

        let credentials = Arc::new(CredentialStore::new(db.employees(), hasher));
        let sessions = Arc::new(SessionStore::new(
            db.sessions(),
            clock.clone(),
            SessionConfig::default(),
        )
        .expect("valid test session config"));

        Self {
            authenticator: Authenticator::new(credentials.clone(), sessions.clone()),
            guard: AccessGuard::new(sessions.clone()),
            db,
            clock,
            credentials,
            sessions,
        }
    }

    /// Create an active employee with the given credentials
    pub async fn create_test_employee(
        &self,
        username: &str,
        password: &str,
        trust_level: TrustLevel,
    ) -> Employee {
        let outcome = self
            .credentials
            .create_employee(NewEmployee {
                username: username.to_string(),
                password: password.to_string(),
                name: format!("{username} Tester"),
                trust_level,
            })
            .await
            .expect("Failed to create test employee");

        match outcome {
            EmployeeCreation::Created(employee) => employee,
            other => panic!("unexpected creation outcome: {other:?}"),
        }
    }

    /// Move the shared clock forward
    pub fn advance_minutes(&self, minutes: i64) {
        self.clock.advance(Duration::minutes(minutes));
    }
}
