use super::*;
use crate::testing::{applied, script_repository, RecordingDatabase};
use crate::TaskError;
use fm_core::compute_checksum;
use fm_db::DbError;

#[test]
fn test_updates_every_record_once() {
    let db = RecordingDatabase::with_history(vec![
        applied("001_init.sql", 1, "CREATE TABLE a (id INT);", 0),
        applied("002_more.sql", 2, "CREATE TABLE b (id INT);", 7),
        applied("010_late.sql", 10, "CREATE TABLE c (id INT);", 9),
    ]);

    let summary = CalculateChecksumTask::new(&db).execute().unwrap();

    assert_eq!(summary, ChecksumSummary { updated: 3, changed: 3 });
    assert_eq!(db.loads.get(), 1);
    let updates = db.updates.borrow();
    assert_eq!(updates.len(), 3);
    let ids: Vec<(u32, &str)> = updates
        .iter()
        .map(|m| (m.version(), m.script_name()))
        .collect();
    assert_eq!(
        ids,
        vec![(1, "001_init.sql"), (2, "002_more.sql"), (10, "010_late.sql")]
    );
    for update in updates.iter() {
        assert_eq!(update.checksum(), compute_checksum(update.script()));
        assert_ne!(update.checksum(), 0);
    }
}

#[test]
fn test_checksums_already_current_are_rewritten_unchanged() {
    let script = "CREATE TABLE a (id INT);";
    let db = RecordingDatabase::with_history(vec![applied(
        "001_init.sql",
        1,
        script,
        compute_checksum(script),
    )]);

    let summary = CalculateChecksumTask::new(&db).execute().unwrap();

    assert_eq!(summary, ChecksumSummary { updated: 1, changed: 0 });
    assert_eq!(db.updates.borrow()[0].checksum(), compute_checksum(script));
}

#[test]
fn test_executed_at_is_carried_through() {
    let record = applied("001_init.sql", 1, "SELECT 1;", 0);
    let db = RecordingDatabase::with_history(vec![record.clone()]);

    CalculateChecksumTask::new(&db).execute().unwrap();

    assert_eq!(db.updates.borrow()[0].executed_at(), record.executed_at());
}

#[test]
fn test_empty_history_writes_nothing() {
    let db = RecordingDatabase::default();
    let summary = CalculateChecksumTask::new(&db).execute().unwrap();
    assert_eq!(summary, ChecksumSummary::default());
    assert!(db.updates.borrow().is_empty());
}

#[test]
fn test_update_failure_aborts_remaining_records() {
    let db = RecordingDatabase {
        fail_update_at: Some(1),
        ..RecordingDatabase::with_history(vec![
            applied("001_a.sql", 1, "a", 0),
            applied("002_b.sql", 2, "b", 0),
            applied("003_c.sql", 3, "c", 0),
        ])
    };

    let err = CalculateChecksumTask::new(&db).execute().unwrap_err();

    assert!(matches!(err, TaskError::Database(DbError::ExecutionError(_))));
    let updates = db.updates.borrow();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].version(), 1);
}

#[test]
fn test_load_failure_writes_nothing() {
    let db = RecordingDatabase {
        fail_load: true,
        ..RecordingDatabase::default()
    };
    assert!(CalculateChecksumTask::new(&db).execute().is_err());
    assert!(db.updates.borrow().is_empty());
}

#[test]
fn test_with_repository_takes_current_script() {
    let old = "CREATE TABLE a (id INT);";
    let new = "-- reformatted\nCREATE TABLE a (\n    id INT\n);";
    let (_dir, repository) = script_repository(&[
        ("001_create_a.sql", new),
        ("002_b.sql", "CREATE TABLE b (id INT);"),
    ]);
    let db = RecordingDatabase::with_history(vec![
        applied("001_init.sql", 1, old, compute_checksum(old)),
        applied("005_gone.sql", 5, "SELECT 5;", 0),
    ]);

    let summary = CalculateChecksumTask::new(&db)
        .with_repository(&repository)
        .execute()
        .unwrap();

    assert_eq!(summary, ChecksumSummary { updated: 2, changed: 2 });
    let updates = db.updates.borrow();
    assert_eq!(updates[0].version(), 1);
    assert_eq!(updates[0].script_name(), "001_create_a.sql");
    assert_eq!(updates[0].script(), new);
    assert_eq!(updates[0].checksum(), compute_checksum(new));
    // no script for v5: stored content is kept
    assert_eq!(updates[1].script(), "SELECT 5;");
    assert_eq!(updates[1].checksum(), compute_checksum("SELECT 5;"));
}
