//! Employee administration.

pub mod service;

pub use service::{ADMINISTER_EMPLOYEES, Deactivation, EmployeeService};
