//! In-memory [`Database`] double for task tests.

use fm_core::DbMigration;
use fm_db::{Database, DbError, DbResult};
use std::cell::{Cell, RefCell};

#[derive(Default)]
pub(crate) struct RecordingDatabase {
    pub history: RefCell<Vec<DbMigration>>,
    pub updates: RefCell<Vec<DbMigration>>,
    pub applied: RefCell<Vec<DbMigration>>,
    pub loads: Cell<usize>,
    pub fail_load: bool,
    /// Fail the n-th update call (0-based)
    pub fail_update_at: Option<usize>,
    pub fail_apply_version: Option<u32>,
}

impl RecordingDatabase {
    pub fn with_history(history: Vec<DbMigration>) -> Self {
        Self {
            history: RefCell::new(history),
            ..Self::default()
        }
    }
}

impl Database for RecordingDatabase {
    fn current_version(&self) -> DbResult<u32> {
        Ok(self
            .history
            .borrow()
            .iter()
            .map(DbMigration::version)
            .max()
            .unwrap_or(0))
    }

    fn load_migrations(&self) -> DbResult<Vec<DbMigration>> {
        self.loads.set(self.loads.get() + 1);
        if self.fail_load {
            return Err(DbError::ConnectionError("connection reset".to_string()));
        }
        Ok(self.history.borrow().clone())
    }

    fn update_migration(&self, migration: &DbMigration) -> DbResult<()> {
        if self.fail_update_at == Some(self.updates.borrow().len()) {
            return Err(DbError::ExecutionError("write timeout".to_string()));
        }
        self.updates.borrow_mut().push(migration.clone());
        Ok(())
    }

    fn apply_migration(&self, migration: &DbMigration) -> DbResult<()> {
        if self.fail_apply_version == Some(migration.version()) {
            return Err(DbError::StatementFailed {
                script_name: migration.script_name().to_string(),
                version: migration.version(),
                statement: migration.script().to_string(),
                message: "syntax error".to_string(),
            });
        }
        self.applied.borrow_mut().push(migration.clone());
        self.history.borrow_mut().push(migration.clone());
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}

/// Write `files` below `<tmp>/db/migration/` and build a repository over them.
pub(crate) fn script_repository(
    files: &[(&str, &str)],
) -> (tempfile::TempDir, fm_core::MigrationRepository) {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path().join("db/migration");
    std::fs::create_dir_all(&base).unwrap();
    for (name, content) in files {
        std::fs::write(base.join(name), content).unwrap();
    }
    let classpath = fm_core::Classpath::new().with_directory(dir.path());
    let repository = fm_core::MigrationRepository::builder(std::sync::Arc::new(classpath))
        .build()
        .unwrap();
    (dir, repository)
}

/// A history record as read back from the database.
pub(crate) fn applied(name: &str, version: u32, script: &str, checksum: u64) -> DbMigration {
    use chrono::TimeZone;
    let at = chrono::Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .unwrap();
    DbMigration::from_history(name, version, script, checksum, at)
}
