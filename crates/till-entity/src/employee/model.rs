//! Employee entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use till_core::types::EmployeeId;

use super::trust_level::TrustLevel;

/// A staff member who can sign in.
///
/// Employees are never hard-deleted. Deactivation clears `active`, after
/// which the employee can no longer sign in but their username stays
/// reserved.
#[derive(Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    /// Unique employee identifier.
    #[sqlx(rename = "employee_id")]
    pub id: EmployeeId,
    /// Login name, unique across all employees ever created.
    pub username: String,
    /// Argon2id password hash in PHC string format.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// First and last name.
    pub name: String,
    /// Authorization level.
    pub trust_level: TrustLevel,
    /// Whether the employee may sign in.
    pub active: bool,
    /// When the employee record was created.
    pub hired_at: DateTime<Utc>,
}

impl fmt::Debug for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Employee")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("name", &self.name)
            .field("trust_level", &self.trust_level)
            .field("active", &self.active)
            .field("hired_at", &self.hired_at)
            .finish()
    }
}

/// Data required to create a new employee.
#[derive(Clone)]
pub struct CreateEmployee {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Assigned trust level.
    pub trust_level: TrustLevel,
}

impl fmt::Debug for CreateEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateEmployee")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("name", &self.name)
            .field("trust_level", &self.trust_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: EmployeeId::new(),
            username: "jdoe".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            name: "Jane Doe".to_string(),
            trust_level: TrustLevel::Manager,
            active: true,
            hired_at: Utc::now(),
        }
    }

    #[test]
    fn test_hash_is_not_serialized() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["trust_level"], "Manager");
    }

    #[test]
    fn test_debug_redacts_hash() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("argon2id"));
        assert!(rendered.contains("<redacted>"));
    }
}
