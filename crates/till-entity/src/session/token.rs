//! Opaque session token value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A session bearer credential.
///
/// `Debug` never prints the value and there is no `Display` impl, so a
/// token cannot end up in a log line by accident. Use [`SessionToken::expose`]
/// when the raw value is genuinely needed (e.g. to set a cookie).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw token string.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Number of characters in the token.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the token is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl From<String> for SessionToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for SessionToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
