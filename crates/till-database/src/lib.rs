//! # till-database
//!
//! Persistence for Till: the repository traits the auth layer is written
//! against, their PostgreSQL implementations, an in-memory implementation
//! used as a test double, pool management, and the migration runner.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use repositories::{
    EmployeeRepository, PgEmployeeRepository, PgSessionRepository, SessionRepository,
};
