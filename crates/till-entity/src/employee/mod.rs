//! Employee domain entities.

pub mod model;
pub mod trust_level;

pub use model::{CreateEmployee, Employee};
pub use trust_level::TrustLevel;
