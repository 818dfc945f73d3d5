//! # till-core
//!
//! Core crate for Till. Contains configuration schemas, the unified
//! error system, the clock abstraction used for session expiry, and
//! typed identifiers.
//!
//! This crate has **no** internal dependencies on other Till crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AppError;
pub use result::AppResult;
