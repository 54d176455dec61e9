//! Ordered schema migrations for the users database.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - All pending migrations apply inside one transaction.
//! - A pre-versioned `users(name, age)` table is carried into the v1 schema,
//!   never silently reused with a missing `id` column.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_users.sql"),
}];

/// Latest schema version this build knows how to produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this build.
/// - `IncompatibleTable` when an unversioned `users` table lacks `name` or
///   `age`.
/// - `Sqlite` when a migration statement fails (including legacy rows that
///   violate the v1 constraints); nothing is applied then.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    let legacy = if current == 0 {
        stash_legacy_users_table(&tx)?
    } else {
        None
    };
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
    }
    if let Some(legacy) = legacy {
        restore_legacy_rows(&tx, legacy)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current, latest
    );
    Ok(())
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Lists column names of `table`; empty when the table does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

const LEGACY_USERS_TABLE: &str = "users_legacy";

/// Shape of an unversioned `users` table moved aside before migration 1.
struct LegacyUsers {
    has_id: bool,
}

fn stash_legacy_users_table(tx: &Transaction<'_>) -> DbResult<Option<LegacyUsers>> {
    let columns = table_columns(tx, "users")?;
    if columns.is_empty() {
        return Ok(None);
    }

    for required in ["name", "age"] {
        if !columns.iter().any(|column| column == required) {
            return Err(DbError::IncompatibleTable {
                table: "users",
                missing_column: required,
            });
        }
    }

    tx.execute_batch(&format!(
        "ALTER TABLE users RENAME TO {LEGACY_USERS_TABLE};"
    ))?;
    Ok(Some(LegacyUsers {
        has_id: columns.iter().any(|column| column == "id"),
    }))
}

fn restore_legacy_rows(tx: &Transaction<'_>, legacy: LegacyUsers) -> DbResult<()> {
    let copy_sql = if legacy.has_id {
        format!("INSERT INTO users (id, name, age) SELECT id, name, age FROM {LEGACY_USERS_TABLE};")
    } else {
        format!("INSERT INTO users (name, age) SELECT name, age FROM {LEGACY_USERS_TABLE};")
    };
    let copied = tx.execute(&copy_sql, [])?;
    tx.execute_batch(&format!("DROP TABLE {LEGACY_USERS_TABLE};"))?;

    info!(
        "event=db_migrate module=db status=ok legacy_table=users copied_rows={}",
        copied
    );
    Ok(())
}
