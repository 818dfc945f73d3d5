//! In-memory implementation of both repository traits.
//!
//! Used as the test double for the auth and service layers. Both traits are
//! implemented on the same value so the session/employee join in
//! [`SessionRepository::find_active`] sees the same employee rows that
//! [`EmployeeRepository`] writes.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use till_core::error::AppError;
use till_core::result::AppResult;
use till_core::types::EmployeeId;
use till_entity::employee::{CreateEmployee, Employee};
use till_entity::session::{ActiveSession, Session, SessionToken};

use crate::repositories::{EmployeeRepository, SessionRepository};

#[derive(Debug, Default)]
struct State {
    employees: HashMap<EmployeeId, Employee>,
    sessions: HashMap<SessionToken, Session>,
}

/// Shared in-memory store. Clones share the same underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<RwLock<State>>,
    offline: Arc<AtomicBool>,
}

impl MemoryDatabase {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Employee repository handle sharing this store.
    pub fn employees(&self) -> Arc<dyn EmployeeRepository> {
        Arc::new(self.clone())
    }

    /// Session repository handle sharing this store.
    pub fn sessions(&self) -> Arc<dyn SessionRepository> {
        Arc::new(self.clone())
    }

    /// Make every subsequent call fail with a database error until reset.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Raw session row, regardless of expiry or employee state.
    pub async fn session_row(&self, token: &SessionToken) -> Option<Session> {
        self.state.read().await.sessions.get(token).cloned()
    }

    /// Number of stored session rows, expired ones included.
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::database("Database unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for MemoryDatabase {
    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<Employee>> {
        self.check_online()?;
        Ok(self.state.read().await.employees.get(&id).cloned())
    }

    async fn find_active_by_username(&self, username: &str) -> AppResult<Option<Employee>> {
        self.check_online()?;
        let state = self.state.read().await;
        Ok(state
            .employees
            .values()
            .find(|e| e.active && e.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        self.check_online()?;
        let state = self.state.read().await;
        Ok(state.employees.values().any(|e| e.username == username))
    }

    async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        self.check_online()?;
        let mut state = self.state.write().await;
        if state.employees.values().any(|e| e.username == data.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let employee = Employee {
            id: EmployeeId::new(),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            name: data.name.clone(),
            trust_level: data.trust_level,
            active: true,
            hired_at: Utc::now(),
        };
        state.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update_password(&self, id: EmployeeId, password_hash: &str) -> AppResult<bool> {
        self.check_online()?;
        let mut state = self.state.write().await;
        match state.employees.get_mut(&id) {
            Some(employee) => {
                employee.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate(&self, id: EmployeeId) -> AppResult<bool> {
        self.check_online()?;
        let mut state = self.state.write().await;
        match state.employees.get_mut(&id) {
            Some(employee) if employee.active => {
                employee.active = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_active(&self) -> AppResult<Vec<Employee>> {
        self.check_online()?;
        let state = self.state.read().await;
        let mut employees: Vec<Employee> =
            state.employees.values().filter(|e| e.active).cloned().collect();
        employees.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(employees)
    }
}

#[async_trait]
impl SessionRepository for MemoryDatabase {
    async fn insert(&self, session: &Session) -> AppResult<()> {
        self.check_online()?;
        let mut state = self.state.write().await;
        if state.sessions.contains_key(&session.token) {
            return Err(AppError::database("Duplicate session token"));
        }
        state.sessions.insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_active(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ActiveSession>> {
        self.check_online()?;
        let state = self.state.read().await;
        let Some(session) = state.sessions.get(token) else {
            return Ok(None);
        };
        if !session.is_live_at(now) {
            return Ok(None);
        }
        let Some(employee) = state.employees.get(&session.employee_id) else {
            return Ok(None);
        };
        if !employee.active {
            return Ok(None);
        }

        Ok(Some(ActiveSession {
            token: session.token.clone(),
            employee_id: employee.id,
            username: employee.username.clone(),
            name: employee.name.clone(),
            trust_level: employee.trust_level,
            expires_at: session.expires_at,
        }))
    }

    async fn update_expiry(
        &self,
        token: &SessionToken,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        self.check_online()?;
        let mut state = self.state.write().await;
        match state.sessions.get_mut(token) {
            Some(session) => {
                session.expires_at = expires_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, token: &SessionToken) -> AppResult<bool> {
        self.check_online()?;
        Ok(self.state.write().await.sessions.remove(token).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use till_entity::employee::TrustLevel;

    fn new_employee(username: &str) -> CreateEmployee {
        CreateEmployee {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            name: "Test Person".to_string(),
            trust_level: TrustLevel::Employee,
        }
    }

    #[tokio::test]
    async fn test_username_reserved_after_deactivation() {
        let db = MemoryDatabase::new();
        let employee = db.create(&new_employee("alice")).await.unwrap();
        assert!(db.deactivate(employee.id).await.unwrap());
        assert!(!db.deactivate(employee.id).await.unwrap());

        assert!(db.username_exists("alice").await.unwrap());
        assert!(db.find_active_by_username("alice").await.unwrap().is_none());
        let err = db.create(&new_employee("alice")).await.unwrap_err();
        assert_eq!(err.kind, till_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_list_active_is_sorted() {
        let db = MemoryDatabase::new();
        for name in ["carol", "alice", "bob"] {
            db.create(&new_employee(name)).await.unwrap();
        }
        let bob = db.find_active_by_username("bob").await.unwrap().unwrap();
        db.deactivate(bob.id).await.unwrap();

        let names: Vec<String> = db
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.username)
            .collect();
        assert_eq!(names, vec!["alice", "carol"]);
    }

    #[tokio::test]
    async fn test_find_active_filters_expiry_and_inactive() {
        let db = MemoryDatabase::new();
        let employee = db.create(&new_employee("dave")).await.unwrap();
        let now = Utc::now();
        let token = SessionToken::new("tok");
        db.insert(&Session {
            token: token.clone(),
            employee_id: employee.id,
            expires_at: now + Duration::minutes(30),
        })
        .await
        .unwrap();

        let found = db.find_active(&token, now).await.unwrap().unwrap();
        assert_eq!(found.username, "dave");
        assert!(db
            .find_active(&token, now + Duration::minutes(30))
            .await
            .unwrap()
            .is_none());

        db.deactivate(employee.id).await.unwrap();
        assert!(db.find_active(&token, now).await.unwrap().is_none());
        assert_eq!(db.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let db = MemoryDatabase::new();
        db.set_offline(true);
        let err = db.list_active().await.unwrap_err();
        assert!(err.is_database());
        db.set_offline(false);
        assert!(db.list_active().await.unwrap().is_empty());
    }
}
