//! Employee credential persistence and verification.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use till_core::error::{AppError, ErrorKind};
use till_core::types::EmployeeId;
use till_database::EmployeeRepository;
use till_entity::employee::{CreateEmployee, Employee, TrustLevel};

use crate::password::PasswordHasher;

/// Input for creating an employee. Carries the plaintext password until it
/// is hashed, so `Debug` redacts it.
#[derive(Clone)]
pub struct NewEmployee {
    /// Desired username.
    pub username: String,
    /// Plaintext initial password.
    pub password: String,
    /// First and last name.
    pub name: String,
    /// Assigned trust level.
    pub trust_level: TrustLevel,
}

impl fmt::Debug for NewEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEmployee")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("trust_level", &self.trust_level)
            .finish()
    }
}

/// Outcome of [`CredentialStore::create_employee`].
#[derive(Debug, Clone)]
pub enum EmployeeCreation {
    /// The employee was stored.
    Created(Employee),
    /// Some employee, active or deactivated, already holds the username.
    UsernameTaken,
    /// A required field was blank.
    InvalidInput(String),
}

/// Reads and writes employee rows and checks passwords against them.
///
/// Knows nothing about sessions.
#[derive(Clone)]
pub struct CredentialStore {
    repo: Arc<dyn EmployeeRepository>,
    hasher: PasswordHasher,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Creates a credential store over the given repository.
    pub fn new(repo: Arc<dyn EmployeeRepository>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    /// Compares a plaintext password with a stored hash.
    pub fn verify_password(&self, plain: &str, hash: &str) -> Result<bool, AppError> {
        self.hasher.verify_password(plain, hash)
    }

    /// Produces a fresh salted hash for `plain`.
    pub fn hash_password(&self, plain: &str) -> Result<String, AppError> {
        self.hasher.hash_password(plain)
    }

    /// Finds an active employee by exact username.
    pub async fn find_active_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Employee>, AppError> {
        self.repo.find_active_by_username(username).await
    }

    /// Finds an employee by id, active or not.
    pub async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, AppError> {
        self.repo.find_by_id(id).await
    }

    /// Creates a new active employee.
    ///
    /// Usernames are reserved forever: a deactivated employee's username
    /// cannot be reused.
    pub async fn create_employee(&self, input: NewEmployee) -> Result<EmployeeCreation, AppError> {
        let username = input.username.trim();
        let name = input.name.trim();
        if username.is_empty() {
            return Ok(EmployeeCreation::InvalidInput(
                "Username must not be empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Ok(EmployeeCreation::InvalidInput(
                "Name must not be empty".to_string(),
            ));
        }

        if self.repo.username_exists(username).await? {
            debug!(username = %username, "Username already taken");
            return Ok(EmployeeCreation::UsernameTaken);
        }

        let data = CreateEmployee {
            username: username.to_string(),
            password_hash: self.hasher.hash_password(&input.password)?,
            name: name.to_string(),
            trust_level: input.trust_level,
        };

        match self.repo.create(&data).await {
            Ok(employee) => {
                info!(
                    employee_id = %employee.id,
                    username = %employee.username,
                    trust_level = %employee.trust_level,
                    "Employee created"
                );
                Ok(EmployeeCreation::Created(employee))
            }
            // Lost a race with a concurrent insert of the same username.
            Err(e) if e.kind == ErrorKind::Conflict => Ok(EmployeeCreation::UsernameTaken),
            Err(e) => Err(e),
        }
    }

    /// Marks an employee inactive. Returns whether anything changed.
    ///
    /// The employee's sessions are left in place and stop resolving.
    pub async fn deactivate_employee(&self, id: EmployeeId) -> Result<bool, AppError> {
        let changed = self.repo.deactivate(id).await?;
        if changed {
            info!(employee_id = %id, "Employee deactivated");
        }
        Ok(changed)
    }

    /// Lists active employees ordered by username.
    pub async fn list_active_employees(&self) -> Result<Vec<Employee>, AppError> {
        self.repo.list_active().await
    }

    /// Stores an already-hashed password. Returns whether a row matched.
    pub async fn update_password_hash(
        &self,
        id: EmployeeId,
        password_hash: &str,
    ) -> Result<bool, AppError> {
        self.repo.update_password(id, password_hash).await
    }
}
