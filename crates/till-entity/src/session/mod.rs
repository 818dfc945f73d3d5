//! Session domain entities.

pub mod model;
pub mod token;

pub use model::{ActiveSession, Session, SessionView};
pub use token::SessionToken;
