//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the data access seam services depend on.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate before touching SQL.
//! - Read paths reject invalid persisted rows instead of masking them.

pub mod user_repo;
