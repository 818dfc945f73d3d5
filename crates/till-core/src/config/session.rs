//! Session management configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Shortest session token accepted from configuration.
pub const MIN_TOKEN_LENGTH: usize = 64;

/// Longest sliding window accepted from configuration (one year).
pub const MAX_TTL_MINUTES: u64 = 365 * 24 * 60;

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sliding expiry window in minutes. Every successful resolve pushes
    /// the expiry this far into the future.
    #[serde(default = "default_ttl")]
    pub ttl_minutes: u64,
    /// Number of alphanumeric characters in a generated session token.
    #[serde(default = "default_token_length")]
    pub token_length: usize,
}

impl SessionConfig {
    /// The sliding window as a duration.
    ///
    /// Fails with a configuration error unless `ttl_minutes` is between 1
    /// and [`MAX_TTL_MINUTES`].
    pub fn ttl(&self) -> Result<Duration, AppError> {
        if self.ttl_minutes == 0 || self.ttl_minutes > MAX_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "session.ttl_minutes must be between 1 and {MAX_TTL_MINUTES}, got {}",
                self.ttl_minutes
            )));
        }

        i64::try_from(self.ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "session.ttl_minutes is out of range: {}",
                    self.ttl_minutes
                ))
            })
    }

    /// Checks the section without building anything from it.
    pub fn validate(&self) -> Result<(), AppError> {
        self.ttl().map(|_| ())
    }

    /// The token length, never shorter than [`MIN_TOKEN_LENGTH`].
    pub fn effective_token_length(&self) -> usize {
        self.token_length.max(MIN_TOKEN_LENGTH)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl(),
            token_length: default_token_length(),
        }
    }
}

fn default_ttl() -> u64 {
    30
}

fn default_token_length() -> usize {
    128
}
