use super::*;
use chrono::TimeZone;

/// Query a single i64 value (convenience for COUNT(*) assertions).
fn count(db: &DuckDbDatabase, sql: &str) -> i64 {
    db.conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

#[test]
fn test_open_memory_creates_history_table() {
    let db = DuckDbDatabase::open_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
    assert_eq!(count(&db, "SELECT COUNT(*) FROM schema_migration"), 0);
    assert_eq!(db.current_version().unwrap(), 0);
    assert!(db.load_migrations().unwrap().is_empty());
}

#[test]
fn test_open_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.duckdb");
    {
        let db = DuckDbDatabase::open(&path).unwrap();
        db.apply_migration(&DbMigration::new("001_init.sql", 1, "CREATE TABLE a (id INT);"))
            .unwrap();
    }
    let db = DuckDbDatabase::open(&path).unwrap();
    assert_eq!(db.current_version().unwrap(), 1);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM a"), 0);
}

#[test]
fn test_new_handles_memory_path() {
    let db = DuckDbDatabase::new(":memory:").unwrap();
    assert_eq!(db.current_version().unwrap(), 0);
}

#[test]
fn test_apply_executes_statements_and_records_history() {
    let db = DuckDbDatabase::open_memory().unwrap();
    let script = "-- users\nCREATE TABLE users (id INT);\nINSERT INTO users VALUES (1);\nINSERT INTO users VALUES (2);";
    db.apply_migration(&DbMigration::new("001_users.sql", 1, script))
        .unwrap();
    db.apply_migration(&DbMigration::new(
        "002_orders.sql",
        2,
        "CREATE TABLE orders (id INT);",
    ))
    .unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM users"), 2);
    assert_eq!(db.current_version().unwrap(), 2);

    let history = db.load_migrations().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].script_name(), "001_users.sql");
    assert_eq!(history[0].script(), script);
    assert_eq!(history[0].checksum(), fm_core::compute_checksum(script));
    assert!(history[0].executed_at().is_some());
}

#[test]
fn test_failed_statement_is_not_recorded() {
    let db = DuckDbDatabase::open_memory().unwrap();
    let err = db
        .apply_migration(&DbMigration::new(
            "001_broken.sql",
            1,
            "CREATE TABLE a (id INT);\nSELECT * FROM missing_table;",
        ))
        .unwrap_err();

    match err {
        DbError::StatementFailed {
            script_name,
            version,
            statement,
            ..
        } => {
            assert_eq!(script_name, "001_broken.sql");
            assert_eq!(version, 1);
            assert_eq!(statement, "SELECT * FROM missing_table");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(db.current_version().unwrap(), 0);
}

#[test]
fn test_checksum_round_trips_full_u64_range() {
    let db = DuckDbDatabase::open_memory().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    db.update_migration(&DbMigration::from_history("001_a.sql", 1, "a", u64::MAX, at))
        .unwrap();
    db.update_migration(&DbMigration::from_history("002_b.sql", 2, "b", 1 << 63, at))
        .unwrap();

    let history = db.load_migrations().unwrap();
    assert_eq!(history[0].checksum(), u64::MAX);
    assert_eq!(history[1].checksum(), 1 << 63);
    assert_eq!(history[0].executed_at(), Some(at));
}

#[test]
fn test_update_keeps_version_and_execution_time() {
    let db = DuckDbDatabase::open_memory().unwrap();
    let at = Utc.with_ymd_and_hms(2023, 6, 1, 8, 30, 0).unwrap();
    db.update_migration(&DbMigration::from_history(
        "001_init.sql",
        1,
        "CREATE TABLE a (id INT);",
        42,
        at,
    ))
    .unwrap();

    let mut stored = db.load_migrations().unwrap().remove(0);
    stored.update_checksum();
    db.update_migration(&stored).unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM schema_migration"), 1);
    let reloaded = db.load_migrations().unwrap().remove(0);
    assert_eq!(reloaded.version(), 1);
    assert_eq!(reloaded.script_name(), "001_init.sql");
    assert_eq!(
        reloaded.checksum(),
        fm_core::compute_checksum("CREATE TABLE a (id INT);")
    );
    assert_eq!(reloaded.executed_at(), Some(at));
}

#[test]
fn test_custom_history_table_and_comment_prefix() {
    let db = DuckDbDatabase::open_memory()
        .unwrap()
        .with_comment_prefix("//")
        .with_history_table("fm_meta.history")
        .unwrap();
    assert_eq!(db.history_table(), "fm_meta.history");

    db.apply_migration(&DbMigration::new(
        "001_init.sql",
        1,
        "// comment; with a semicolon\nCREATE TABLE a (id INT);",
    ))
    .unwrap();
    assert_eq!(count(&db, "SELECT COUNT(*) FROM fm_meta.history"), 1);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM a"), 0);
}
