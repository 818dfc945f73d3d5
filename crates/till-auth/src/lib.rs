//! # till-auth
//!
//! Session authentication and trust-level authorization for Till.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing
//! - `credential`: Employee lookup, creation, deactivation and password checks
//! - `session`: Token generation and the sliding-expiry session store
//! - `authenticator`: Login, logout and password change
//! - `guard`: Session resolution plus minimum trust-level enforcement

pub mod authenticator;
pub mod credential;
pub mod guard;
pub mod password;
pub mod session;

pub use authenticator::{Authenticator, PasswordChange};
pub use credential::{CredentialStore, EmployeeCreation, NewEmployee};
pub use guard::{AccessDecision, AccessGuard, GuardOutcome, authorize};
pub use password::PasswordHasher;
pub use session::SessionStore;
