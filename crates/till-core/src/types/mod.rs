//! Shared value types used across Till crates.

pub mod id;

pub use id::EmployeeId;
