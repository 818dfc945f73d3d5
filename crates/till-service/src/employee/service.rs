//! Guarded employee administration and self-service password change.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use till_auth::{
    AccessGuard, Authenticator, CredentialStore, EmployeeCreation, GuardOutcome, NewEmployee,
    PasswordChange,
};
use till_core::error::AppError;
use till_core::types::EmployeeId;
use till_entity::employee::{Employee, TrustLevel};
use till_entity::session::{ActiveSession, SessionToken};

use crate::guarded::Guarded;

/// Minimum trust level for employee administration.
pub const ADMINISTER_EMPLOYEES: TrustLevel = TrustLevel::Manager;

/// Outcome of [`EmployeeService::deactivate_employee`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deactivation {
    /// The employee can no longer sign in.
    Deactivated,
    /// The caller tried to deactivate their own account.
    SelfDeactivation,
    /// No active employee has that id.
    NotFound,
}

/// Employee operations, each behind the access guard.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    guard: Arc<AccessGuard>,
    authenticator: Arc<Authenticator>,
    credentials: Arc<CredentialStore>,
}

impl EmployeeService {
    /// Creates a new employee service.
    pub fn new(
        guard: Arc<AccessGuard>,
        authenticator: Arc<Authenticator>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        Self {
            guard,
            authenticator,
            credentials,
        }
    }

    /// Creates an employee. Requires Manager.
    ///
    /// A manager may assign any trust level, including levels above their
    /// own.
    pub async fn add_employee(
        &self,
        token: Option<&SessionToken>,
        input: NewEmployee,
    ) -> Result<Guarded<EmployeeCreation>, AppError> {
        self.with_level(token, ADMINISTER_EMPLOYEES, |session| async move {
            let outcome = self.credentials.create_employee(input).await?;
            if let EmployeeCreation::Created(ref employee) = outcome {
                info!(
                    by = %session.employee_id,
                    employee_id = %employee.id,
                    "Employee added"
                );
            }
            Ok(outcome)
        })
        .await
    }

    /// Lists active employees ordered by username. Requires Manager.
    pub async fn list_employees(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<Guarded<Vec<Employee>>, AppError> {
        self.with_level(token, ADMINISTER_EMPLOYEES, |_| async move {
            self.credentials.list_active_employees().await
        })
        .await
    }

    /// Deactivates another employee. Requires Manager.
    ///
    /// The target's open sessions stop resolving on their next use.
    pub async fn deactivate_employee(
        &self,
        token: Option<&SessionToken>,
        employee_id: EmployeeId,
    ) -> Result<Guarded<Deactivation>, AppError> {
        self.with_level(token, ADMINISTER_EMPLOYEES, |session| async move {
            if session.employee_id == employee_id {
                warn!(employee_id = %employee_id, "Refused self-deactivation");
                return Ok(Deactivation::SelfDeactivation);
            }

            if self.credentials.deactivate_employee(employee_id).await? {
                info!(
                    by = %session.employee_id,
                    employee_id = %employee_id,
                    "Employee deactivated by manager"
                );
                Ok(Deactivation::Deactivated)
            } else {
                Ok(Deactivation::NotFound)
            }
        })
        .await
    }

    /// Changes the caller's own password. Requires any signed-in employee.
    pub async fn change_own_password(
        &self,
        token: Option<&SessionToken>,
        old_password: &str,
        new_password: &str,
    ) -> Result<Guarded<PasswordChange>, AppError> {
        self.with_level(token, TrustLevel::Employee, |session| async move {
            self.authenticator
                .change_password(session.employee_id, old_password, new_password)
                .await
        })
        .await
    }

    async fn with_level<T, F, Fut>(
        &self,
        token: Option<&SessionToken>,
        required: TrustLevel,
        op: F,
    ) -> Result<Guarded<T>, AppError>
    where
        F: FnOnce(ActiveSession) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        match self.guard.guard(token, required).await? {
            GuardOutcome::SignedOut => Ok(Guarded::SignedOut),
            GuardOutcome::Denied(_) => Ok(Guarded::Denied),
            GuardOutcome::Allowed(session) => op(session).await.map(Guarded::Done),
        }
    }
}
