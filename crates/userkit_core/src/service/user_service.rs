//! User persistence use-cases.
//!
//! # Invariants
//! - Each `save_user` call issues exactly one repository insert.
//! - Invalid input is rejected before the repository is reached.

use crate::db::open_db;
use crate::model::user::{NewUser, UserId, UserRow};
use crate::repo::user_repo::{RepoResult, SqliteUserRepository, UserRepository};
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Use-case wrapper over a [`UserRepository`].
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists one `(name, age)` pair.
    ///
    /// Returns the row id assigned by the repository. Validation and storage
    /// errors are returned unchanged.
    pub fn save_user(&self, name: impl Into<String>, age: u32) -> RepoResult<UserId> {
        let started_at = Instant::now();
        let user = NewUser::new(name, age);
        user.validate()?;

        match self.repo.insert_user(&user) {
            Ok(id) => {
                info!(
                    "event=user_save module=service status=ok id={} duration_ms={}",
                    id,
                    started_at.elapsed().as_millis()
                );
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=user_save module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    pub fn get_user(&self, id: UserId) -> RepoResult<Option<UserRow>> {
        self.repo.get_user(id)
    }

    pub fn list_users(&self) -> RepoResult<Vec<UserRow>> {
        self.repo.list_users()
    }
}

/// Opens the database at `path`, saves one user, and closes the connection.
///
/// The file and schema are created on first use.
pub fn save_user_to_path(path: impl AsRef<Path>, name: &str, age: u32) -> RepoResult<UserId> {
    let conn = open_db(path)?;
    let id = UserService::new(SqliteUserRepository::try_new(&conn)?).save_user(name, age)?;
    conn.close().map_err(|(_, err)| err)?;
    Ok(id)
}
