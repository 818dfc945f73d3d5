//! # till-service
//!
//! Business operations for Till. Every privileged operation resolves the
//! caller's session through the access guard, checks its trust level, and
//! only then touches the credential store.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. [`ServiceContext`] wires the
//! whole stack from repositories, a clock, and configuration.

pub mod context;
pub mod employee;
pub mod guarded;

pub use context::ServiceContext;
pub use employee::{Deactivation, EmployeeService};
pub use guarded::Guarded;
