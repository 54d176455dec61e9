//! In-memory user registries.
//!
//! # Responsibility
//! - Own process-local identifier -> profile mappings.
//! - Keep insert-if-absent semantics independent from any storage backend.
//!
//! # Invariants
//! - Keys are unique; a duplicate insert never overwrites an existing value.
//! - Nothing in this module persists or shares state across owners.

pub mod user_registry;
