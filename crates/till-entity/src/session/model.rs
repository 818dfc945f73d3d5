//! Session entity model and the resolved session view.

use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::Serialize;
use sqlx::FromRow;

use till_core::types::EmployeeId;

use super::token::SessionToken;
use crate::employee::TrustLevel;

/// A row in the `sessions` table.
///
/// A session is valid iff the current time is before `expires_at` and the
/// owning employee is active. Expired rows are never purged; they are
/// simply ignored by lookups.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
    /// Bearer token identifying the session. Never serialized.
    #[sqlx(rename = "session_token")]
    #[serde(skip_serializing)]
    pub token: SessionToken,
    /// The employee this session belongs to.
    pub employee_id: EmployeeId,
    /// When the session stops being valid unless refreshed.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session is unexpired at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// A live session joined with its owning employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ActiveSession {
    /// Bearer token identifying the session. Never serialized.
    #[sqlx(rename = "session_token")]
    #[serde(skip_serializing)]
    pub token: SessionToken,
    /// The signed-in employee.
    pub employee_id: EmployeeId,
    /// The employee's username.
    pub username: String,
    /// The employee's display name.
    pub name: String,
    /// The employee's trust level at resolve time.
    pub trust_level: TrustLevel,
    /// Expiry after the most recent refresh.
    pub expires_at: DateTime<Utc>,
}

/// The outcome of resolving a session token.
///
/// Every authentication failure (no token, unknown token, expired session,
/// inactive employee, bad credentials) collapses to `SignedOut`, so callers
/// cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    /// No valid session.
    SignedOut,
    /// A valid, freshly refreshed session.
    SignedIn(ActiveSession),
}

impl SessionView {
    /// Whether the view holds a valid session.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    /// The signed-in session, if any.
    pub fn session(&self) -> Option<&ActiveSession> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::SignedOut => None,
        }
    }

    /// Consumes the view, returning the signed-in session if any.
    pub fn into_session(self) -> Option<ActiveSession> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::SignedOut => None,
        }
    }
}

impl From<Option<ActiveSession>> for SessionView {
    fn from(session: Option<ActiveSession>) -> Self {
        session.map_or(Self::SignedOut, Self::SignedIn)
    }
}

/// Wire shape: `{"signed_in": false}` or `{"signed_in": true, ...session}`.
#[derive(Serialize)]
struct SessionViewWire<'a> {
    signed_in: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    session: Option<&'a ActiveSession>,
}

impl Serialize for SessionView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SessionViewWire {
            signed_in: self.is_signed_in(),
            session: self.session(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> ActiveSession {
        ActiveSession {
            token: SessionToken::new("a".repeat(128)),
            employee_id: EmployeeId::new(),
            username: "jdoe".to_string(),
            name: "Jane Doe".to_string(),
            trust_level: TrustLevel::Owner,
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_row_serializes_without_token() {
        let session = Session {
            token: SessionToken::new("b".repeat(128)),
            employee_id: EmployeeId::new(),
            expires_at: Utc::now(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("token").is_none());
        assert!(!json.to_string().contains(&"b".repeat(128)));
        assert!(json.get("expires_at").is_some());
    }

    #[test]
    fn test_signed_out_serializes_to_bare_flag() {
        let json = serde_json::to_value(SessionView::SignedOut).unwrap();
        assert_eq!(json, serde_json::json!({ "signed_in": false }));
    }

    #[test]
    fn test_signed_in_serializes_without_token() {
        let session = active();
        let json = serde_json::to_value(SessionView::SignedIn(session.clone())).unwrap();
        assert_eq!(json["signed_in"], true);
        assert_eq!(json["username"], "jdoe");
        assert_eq!(json["trust_level"], "Owner");
        assert_eq!(json["employee_id"], session.employee_id.to_string());
        assert!(json.get("token").is_none());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let rendered = format!("{:?}", active());
        assert!(!rendered.contains(&"a".repeat(128)));
    }

    #[test]
    fn test_liveness_is_strict() {
        let now = Utc::now();
        let session = Session {
            token: SessionToken::new("t"),
            employee_id: EmployeeId::new(),
            expires_at: now,
        };
        assert!(!session.is_live_at(now));
        assert!(session.is_live_at(now - chrono::Duration::seconds(1)));
    }
}
