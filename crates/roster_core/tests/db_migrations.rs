use roster_core::db::migrations::latest_version;
use roster_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_store");
}

#[test]
fn reopening_file_database_keeps_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.sqlite3");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_table_exists(&second, "kv_store");
}

#[test]
fn database_from_newer_binary_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
