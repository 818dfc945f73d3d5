//! Login, logout and password change.

use std::sync::Arc;

use tracing::{debug, info};

use till_core::error::AppError;
use till_core::types::EmployeeId;
use till_entity::session::{SessionToken, SessionView};

use crate::credential::CredentialStore;
use crate::session::SessionStore;

/// Outcome of [`Authenticator::change_password`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChange {
    /// The new hash was stored.
    Changed,
    /// No employee has the given id.
    EmployeeNotFound,
    /// The supplied old password did not match. Nothing was written.
    OldPasswordIncorrect,
}

impl PasswordChange {
    /// Message suitable for showing to the signed-in employee.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Changed => "Password changed.",
            Self::EmployeeNotFound => "Employee not found.",
            Self::OldPasswordIncorrect => "Old password is incorrect.",
        }
    }
}

/// Orchestrates credential checks and session lifecycle.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Arc<CredentialStore>,
    sessions: Arc<SessionStore>,
}

impl Authenticator {
    /// Creates an authenticator.
    pub fn new(credentials: Arc<CredentialStore>, sessions: Arc<SessionStore>) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    /// Checks credentials and, on success, starts a session.
    ///
    /// Unknown usernames, deactivated employees and wrong passwords all
    /// return [`SessionView::SignedOut`]. The signed-in view carries the new
    /// token for the caller to hand back to the client.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionView, AppError> {
        let Some(employee) = self.credentials.find_active_by_username(username).await? else {
            debug!("Login rejected");
            return Ok(SessionView::SignedOut);
        };

        if !self
            .credentials
            .verify_password(password, &employee.password_hash)?
        {
            debug!(employee_id = %employee.id, "Login rejected");
            return Ok(SessionView::SignedOut);
        }

        let token = self.sessions.create(employee.id).await?;
        let view = self.sessions.resolve(Some(&token)).await?;

        info!(
            employee_id = %employee.id,
            signed_in = view.is_signed_in(),
            "Login accepted"
        );
        Ok(view)
    }

    /// Ends the session identified by `token`. Unknown tokens are ignored.
    pub async fn logout(&self, token: &SessionToken) -> Result<(), AppError> {
        self.sessions.destroy(token).await
    }

    /// Replaces an employee's password after re-checking the old one.
    pub async fn change_password(
        &self,
        employee_id: EmployeeId,
        old_password: &str,
        new_password: &str,
    ) -> Result<PasswordChange, AppError> {
        let Some(employee) = self.credentials.find_by_id(employee_id).await? else {
            return Ok(PasswordChange::EmployeeNotFound);
        };

        if !self
            .credentials
            .verify_password(old_password, &employee.password_hash)?
        {
            debug!(employee_id = %employee_id, "Password change rejected");
            return Ok(PasswordChange::OldPasswordIncorrect);
        }

        let hash = self.credentials.hash_password(new_password)?;
        if !self
            .credentials
            .update_password_hash(employee_id, &hash)
            .await?
        {
            return Ok(PasswordChange::EmployeeNotFound);
        }

        info!(employee_id = %employee_id, "Password changed");
        Ok(PasswordChange::Changed)
    }
}
