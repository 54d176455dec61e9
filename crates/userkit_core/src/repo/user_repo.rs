//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert and read rows of the `users` table.
//!
//! # Invariants
//! - `insert_user` runs `NewUser::validate()` first.
//! - Inserts bind parameters positionally; values are never spliced into SQL.

use crate::db::migrations::{latest_version, schema_version, table_columns};
use crate::db::DbError;
use crate::model::user::{NewUser, UserId, UserRow, UserValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Exact statement issued for every insert.
pub const INSERT_USER_SQL: &str = "INSERT INTO users (name, age) VALUES (?1, ?2);";

const USER_SELECT_SQL: &str = "SELECT id, name, age FROM users";
const USER_REQUIRED_COLUMNS: [&str; 3] = ["id", "name", "age"];

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(UserValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access seam for user persistence.
///
/// Services hold this trait instead of a connection, so tests can swap in a
/// recording fake and assert on the exact write issued.
pub trait UserRepository {
    /// Persists one user and returns its assigned row id.
    fn insert_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<UserRow>>;
    /// Lists all users ordered by id.
    fn list_users(&self) -> RepoResult<Vec<UserRow>>;
}

impl<R: UserRepository + ?Sized> UserRepository for &R {
    fn insert_user(&self, user: &NewUser) -> RepoResult<UserId> {
        (**self).insert_user(user)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<UserRow>> {
        (**self).get_user(id)
    }

    fn list_users(&self) -> RepoResult<Vec<UserRow>> {
        (**self).list_users()
    }
}

/// SQLite-backed user repository borrowing a migrated connection.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when `users` is absent despite the version.
    /// - `MissingRequiredColumn` when `users` lacks `id`, `name` or `age`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = schema_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let columns = table_columns(conn, "users")?;
        if columns.is_empty() {
            return Err(RepoError::MissingRequiredTable("users"));
        }
        if let Some(column) = USER_REQUIRED_COLUMNS
            .into_iter()
            .find(|required| !columns.iter().any(|column| column == required))
        {
            return Err(RepoError::MissingRequiredColumn {
                table: "users",
                column,
            });
        }

        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, user: &NewUser) -> RepoResult<UserId> {
        user.validate()?;

        self.conn
            .execute(INSERT_USER_SQL, params![user.name.as_str(), user.age])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<UserRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn list_users(&self) -> RepoResult<Vec<UserRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<UserRow> {
    let id: UserId = row.get("id")?;
    let raw_age: i64 = row.get("age")?;
    let age = u32::try_from(raw_age).map_err(|_| {
        RepoError::InvalidData(format!("invalid age value `{raw_age}` in users.age (id={id})"))
    })?;

    let user = UserRow {
        id,
        name: row.get("name")?,
        age,
    };
    user.to_new_user().validate().map_err(|err| {
        RepoError::InvalidData(format!("row id={id} fails validation: {err}"))
    })?;
    Ok(user)
}
