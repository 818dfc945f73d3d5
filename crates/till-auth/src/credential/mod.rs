//! Employee credentials: lookup, creation, deactivation, and password checks.

pub mod store;

pub use store::{CredentialStore, EmployeeCreation, NewEmployee};
