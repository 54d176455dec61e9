use rusqlite::Connection;
use userkit_core::db::migrations::{latest_version, table_columns};
use userkit_core::db::{open_db, open_db_in_memory, DbError};
use userkit_core::{save_user_to_path, SqliteUserRepository, UserRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "users");
    assert_eq!(
        table_columns(&conn, "users").unwrap(),
        vec!["id".to_string(), "name".to_string(), "age".to_string()]
    );
}

#[test]
fn reopening_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.db");

    let first = open_db(&path).unwrap();
    first
        .execute("INSERT INTO users (name, age) VALUES ('Alice', 30);", [])
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn users_table_rejects_blank_names_at_storage_level() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute("INSERT INTO users (name, age) VALUES ('  ', 30);", []);
    assert!(result.is_err());
}

#[test]
fn unversioned_users_table_is_carried_into_current_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE users (name TEXT, age INTEGER);
         INSERT INTO users (name, age) VALUES ('Alice', 30);",
    )
    .unwrap();
    drop(conn);

    let id = save_user_to_path(&path, "Bob", 41).unwrap();

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_table_missing(&conn, "users_legacy");
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let rows: Vec<_> = repo
        .list_users()
        .unwrap()
        .into_iter()
        .map(|row| (row.id, row.name, row.age))
        .collect();
    assert_eq!(
        rows,
        vec![(1, "Alice".to_string(), 30), (id, "Bob".to_string(), 41)]
    );
    assert_ne!(id, 1);
}

#[test]
fn unversioned_users_table_without_age_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE users (name TEXT);").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::IncompatibleTable {
            table,
            missing_column,
        } => {
            assert_eq!(table, "users");
            assert_eq!(missing_column, "age");
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
}

#[test]
fn unversioned_rows_violating_constraints_roll_back_migration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE users (name TEXT, age INTEGER);
         INSERT INTO users (name, age) VALUES (NULL, 30);",
    )
    .unwrap();
    drop(conn);

    assert!(matches!(open_db(&path).unwrap_err(), DbError::Sqlite(_)));

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
    assert_table_missing(&conn, "users_legacy");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn assert_table_missing(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 0, "table {table_name} should not exist");
}
