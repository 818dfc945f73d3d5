//! # till-entity
//!
//! Domain entity models for Till. Every struct in this crate represents a
//! database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; anything holding a credential redacts it from `Debug`.

pub mod employee;
pub mod session;
