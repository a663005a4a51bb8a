use rusqlite::Connection;
use studentdash_core::db::migrations::{latest_version, schema_version};
use studentdash_core::db::{open_db, open_db_in_memory, open_db_with_retry, DbError, RetryPolicy};
use std::time::Duration;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "students");
}

#[test]
fn reopening_a_store_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO students (name, grade, subject) VALUES ('Alice', '9th', 'Science');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn schema_defaults_fill_gender_and_marks() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO students (name, grade, subject) VALUES ('Bob', '8th', 'English');",
        [],
    )
    .unwrap();

    let (gender, marks, age): (String, i64, Option<i64>) = conn
        .query_row("SELECT gender, marks, age FROM students;", [], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .unwrap();
    assert_eq!(gender, "Prefer not to say");
    assert_eq!(marks, 0);
    assert_eq!(age, None);
}

#[test]
fn blank_names_are_rejected_by_the_schema() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO students (name, grade, subject) VALUES ('   ', '8th', 'English');",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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
fn retry_does_not_repeat_schema_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let policy = RetryPolicy {
        max_attempts: 3,
        interval: Duration::from_secs(60),
    };
    let err = open_db_with_retry(&path, &policy).unwrap_err();
    assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
}

#[test]
fn retry_opens_a_reachable_store_on_first_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    let conn = open_db_with_retry(&path, &RetryPolicy::default()).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
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
