//! Domain model for persisted users.
//!
//! # Responsibility
//! - Define the write and read shapes of the `users` table.
//! - Own field validation shared by every write path.
//!
//! # Invariants
//! - Persistence must call `NewUser::validate()` before writing.

pub mod user;
