//! Trust-level access control.
//!
//! Every protected operation resolves the caller's session first and then
//! compares trust levels through [`authorize`]. Nothing else in the
//! workspace compares trust levels for access decisions.

use std::sync::Arc;

use tracing::debug;

use till_core::error::AppError;
use till_entity::employee::TrustLevel;
use till_entity::session::{ActiveSession, SessionToken, SessionView};

use crate::session::SessionStore;

/// Result of comparing a session's trust level with a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The session holds at least the required level.
    Allow,
    /// The session's level is below the requirement.
    Deny,
}

impl AccessDecision {
    /// Whether the decision is [`AccessDecision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Result of [`AccessGuard::guard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// No valid session.
    SignedOut,
    /// Signed in, but below the required level.
    Denied(ActiveSession),
    /// Signed in at or above the required level.
    Allowed(ActiveSession),
}

/// Allows iff the session's trust level is at least `required`.
///
/// Takes a resolved session, so it cannot be called on a signed-out view.
/// There is no super-user bypass.
pub fn authorize(session: &ActiveSession, required: TrustLevel) -> AccessDecision {
    if session.trust_level.has_at_least(required) {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny
    }
}

/// Resolves sessions and enforces minimum trust levels.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    sessions: Arc<SessionStore>,
}

impl AccessGuard {
    /// Creates a guard backed by `sessions`.
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    /// Resolves the request's token, refreshing the session on success.
    pub async fn authenticate(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<SessionView, AppError> {
        self.sessions.resolve(token).await
    }

    /// See [`authorize`].
    pub fn authorize(&self, session: &ActiveSession, required: TrustLevel) -> AccessDecision {
        authorize(session, required)
    }

    /// Authenticates, then authorizes against `required`.
    pub async fn guard(
        &self,
        token: Option<&SessionToken>,
        required: TrustLevel,
    ) -> Result<GuardOutcome, AppError> {
        let SessionView::SignedIn(session) = self.authenticate(token).await? else {
            return Ok(GuardOutcome::SignedOut);
        };

        match authorize(&session, required) {
            AccessDecision::Allow => Ok(GuardOutcome::Allowed(session)),
            AccessDecision::Deny => {
                debug!(
                    employee_id = %session.employee_id,
                    held = %session.trust_level,
                    required = %required,
                    "Access denied"
                );
                Ok(GuardOutcome::Denied(session))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use till_core::types::EmployeeId;

    fn session_at(level: TrustLevel) -> ActiveSession {
        ActiveSession {
            token: SessionToken::new("t"),
            employee_id: EmployeeId::new(),
            username: "u".to_string(),
            name: "U".to_string(),
            trust_level: level,
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_authorize_all_pairs() {
        for held in TrustLevel::ALL {
            for required in TrustLevel::ALL {
                let expected = if held.level() >= required.level() {
                    AccessDecision::Allow
                } else {
                    AccessDecision::Deny
                };
                assert_eq!(
                    authorize(&session_at(held), required),
                    expected,
                    "held {held}, required {required}"
                );
            }
        }
    }

    #[test]
    fn test_no_level_skips_the_comparison() {
        assert!(authorize(&session_at(TrustLevel::Admin), TrustLevel::Admin).is_allowed());
        assert!(!authorize(&session_at(TrustLevel::Owner), TrustLevel::Admin).is_allowed());
        assert!(!authorize(&session_at(TrustLevel::Employee), TrustLevel::Manager).is_allowed());
    }
}
