//! Session lifecycle: token generation, creation, sliding-expiry resolve,
//! and destruction.

pub mod store;
pub mod token;

pub use store::SessionStore;
pub use token::generate_token;
