//! Use-case services.
//!
//! # Responsibility
//! - Turn caller input into validated write models.
//! - Depend on repository traits, never on SQLite directly.

pub mod user_service;
