//! Insert-if-absent user registry.
//!
//! # Responsibility
//! - Map a user identifier (name or numeric id) to one profile value.
//! - Report duplicate inserts as typed errors instead of overwriting.
//!
//! # Invariants
//! - `add` never replaces an existing entry.
//! - `get` and `remove` are total over their input domain.

use log::debug;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

pub type RegistryResult<T, K> = Result<T, DuplicateKeyError<K>>;

/// Returned by [`UserRegistry::add`] when the key is already registered.
///
/// Carries the rejected key back to the caller; the value passed to `add` is
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyError<K> {
    pub key: K,
}

impl<K: Debug> Display for DuplicateKeyError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "user already exists: {:?}", self.key)
    }
}

impl<K: Debug> Error for DuplicateKeyError<K> {}

/// Process-local mapping from user identifier to profile value.
///
/// The key type is fixed per instance, so a registry keyed by username and
/// one keyed by numeric id are distinct types:
///
/// ```
/// use userkit_core::UserRegistry;
///
/// let mut emails: UserRegistry = UserRegistry::new();
/// emails.add("sanjay".to_string(), "a@x.com".to_string()).unwrap();
/// assert_eq!(emails.get("sanjay").map(String::as_str), Some("a@x.com"));
///
/// let mut names: UserRegistry<i64> = UserRegistry::new();
/// names.add(1, "Alice".to_string()).unwrap();
/// assert!(names.add(1, "Bob".to_string()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UserRegistry<K = String, V = String> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for UserRegistry<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> UserRegistry<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key` when `key` is not yet registered.
    ///
    /// # Errors
    /// - Returns [`DuplicateKeyError`] when `key` already exists. The stored
    ///   value is left untouched.
    pub fn add(&mut self, key: K, value: V) -> RegistryResult<(), K> {
        if self.entries.contains_key(&key) {
            debug!(
                "event=registry_add module=registry status=rejected reason=duplicate_key size={}",
                self.entries.len()
            );
            return Err(DuplicateKeyError { key });
        }

        self.entries.insert(key, value);
        Ok(())
    }

    /// Returns the value registered under `key`, or `None` when absent.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Removes `key` and returns its value. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry, returning the registry to its freshly built state.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
