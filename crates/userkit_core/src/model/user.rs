//! User record model.
//!
//! # Responsibility
//! - Describe the `(name, age)` pair accepted by the persistence layer.
//! - Describe rows read back from storage.
//!
//! # Invariants
//! - `name` is non-empty after trimming and at most `MAX_NAME_CHARS` chars.
//! - `age` lies within `0..=MAX_AGE`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row id assigned by SQLite on insert.
pub type UserId = i64;

pub const MAX_NAME_CHARS: usize = 128;
pub const MAX_AGE: u32 = 150;

/// Validation failures for user write models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong { chars: usize },
    AgeOutOfRange(u32),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name cannot be empty"),
            Self::NameTooLong { chars } => write!(
                f,
                "user name has {chars} characters; at most {MAX_NAME_CHARS} allowed"
            ),
            Self::AgeOutOfRange(age) => {
                write!(f, "user age {age} is outside 0..={MAX_AGE}")
            }
        }
    }
}

impl Error for UserValidationError {}

/// Write model for one `users` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
}

impl NewUser {
    /// Builds a write model. The name is stored exactly as given; call
    /// [`NewUser::validate`] before persisting.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Checks field invariants.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is blank.
    /// - `NameTooLong` when `name` exceeds `MAX_NAME_CHARS` characters.
    /// - `AgeOutOfRange` when `age > MAX_AGE`.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        let chars = self.name.chars().count();
        if chars > MAX_NAME_CHARS {
            return Err(UserValidationError::NameTooLong { chars });
        }

        if self.age > MAX_AGE {
            return Err(UserValidationError::AgeOutOfRange(self.age));
        }

        Ok(())
    }
}

/// Read model for one persisted `users` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub age: u32,
}

impl UserRow {
    /// Drops the storage id, returning the write-side shape.
    pub fn to_new_user(&self) -> NewUser {
        NewUser::new(self.name.clone(), self.age)
    }
}

#[cfg(test)]
mod tests {
    use super::{NewUser, UserValidationError, MAX_AGE, MAX_NAME_CHARS};

    #[test]
    fn validate_accepts_regular_user() {
        NewUser::new("Alice", 30).validate().unwrap();
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = NewUser::new("   ", 30).validate().unwrap_err();
        assert_eq!(err, UserValidationError::EmptyName);
    }

    #[test]
    fn validate_rejects_long_name_and_large_age() {
        let long_name = "x".repeat(MAX_NAME_CHARS + 1);
        assert!(matches!(
            NewUser::new(long_name, 1).validate(),
            Err(UserValidationError::NameTooLong { .. })
        ));
        assert_eq!(
            NewUser::new("Bob", MAX_AGE + 1).validate(),
            Err(UserValidationError::AgeOutOfRange(MAX_AGE + 1))
        );
    }
}
