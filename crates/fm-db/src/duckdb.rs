//! DuckDB database implementation
//!
//! The history table is created on open. Checksums are unsigned 64-bit values
//! stored in a `BIGINT` column, reinterpreted bit-for-bit.

use crate::error::{DbError, DbResult};
use crate::statements::split_statements;
use crate::traits::Database;
use chrono::{DateTime, Utc};
use duckdb::Connection;
use fm_core::DbMigration;
use std::path::Path;

/// Default name of the migration history table
pub const DEFAULT_HISTORY_TABLE: &str = "schema_migration";

/// Default prefix of comment lines skipped during execution
pub const DEFAULT_COMMENT_PREFIX: &str = "--";

/// DuckDB-backed migration history and executor
///
/// Single-threaded: migrations are applied sequentially by one process.
pub struct DuckDbDatabase {
    conn: Connection,
    history_table: String,
    comment_prefix: String,
}

impl DuckDbDatabase {
    /// Open (or create) a database file and ensure the history table exists.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Self::from_connection(conn, DEFAULT_HISTORY_TABLE)
    }

    /// Create an in-memory database. Useful for tests and dry runs.
    pub fn open_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Self::from_connection(conn, DEFAULT_HISTORY_TABLE)
    }

    /// Open from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::open_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Use a different history table, creating it if needed.
    ///
    /// `table` must be a plain or schema-qualified identifier; configuration
    /// validation guarantees this for values coming from feathermig.yml.
    pub fn with_history_table(self, table: &str) -> DbResult<Self> {
        Self::from_connection(self.conn, table).map(|db| Self {
            comment_prefix: self.comment_prefix,
            ..db
        })
    }

    /// Skip lines starting with `prefix` when executing scripts.
    pub fn with_comment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.comment_prefix = prefix.into();
        self
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn history_table(&self) -> &str {
        &self.history_table
    }

    fn from_connection(conn: Connection, table: &str) -> DbResult<Self> {
        ensure_history_table(&conn, table)?;
        Ok(Self {
            conn,
            history_table: table.to_string(),
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
        })
    }

    fn record(&self, migration: &DbMigration) -> DbResult<()> {
        let sql = format!(
            "INSERT INTO {table} (version, script_name, script, checksum, executed_at)
             VALUES (?, ?, ?, ?, COALESCE(epoch_ms(?::BIGINT), now()::TIMESTAMP))
             ON CONFLICT (version) DO UPDATE SET
                 script_name = excluded.script_name,
                 script = excluded.script,
                 checksum = excluded.checksum",
            table = self.history_table
        );
        self.conn
            .execute(
                &sql,
                duckdb::params![
                    i64::from(migration.version()),
                    migration.script_name(),
                    migration.script(),
                    checksum_to_sql(migration.checksum()),
                    migration.executed_at().map(|at| at.timestamp_millis()),
                ],
            )
            .map_err(|e| {
                DbError::ExecutionError(format!(
                    "failed to record migration v{}: {e}",
                    migration.version()
                ))
            })?;
        Ok(())
    }
}

/// Ensure the (optionally schema-qualified) history table exists.
fn ensure_history_table(conn: &Connection, table: &str) -> DbResult<()> {
    if let Some((schema, _)) = table.split_once('.') {
        conn.execute_batch(&format!("CREATE SCHEMA IF NOT EXISTS {schema};"))
            .map_err(|e| DbError::ExecutionError(format!("failed to create schema {schema}: {e}")))?;
    }
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
             version     BIGINT PRIMARY KEY,
             script_name VARCHAR NOT NULL,
             script      VARCHAR NOT NULL,
             checksum    BIGINT NOT NULL,
             executed_at TIMESTAMP NOT NULL DEFAULT now()
         );"
    ))
    .map_err(|e| DbError::ExecutionError(format!("failed to create {table} table: {e}")))?;
    Ok(())
}

fn checksum_to_sql(checksum: u64) -> i64 {
    checksum as i64
}

fn checksum_from_sql(stored: i64) -> u64 {
    stored as u64
}

fn version_from_sql(stored: i64) -> DbResult<u32> {
    u32::try_from(stored)
        .map_err(|_| DbError::CorruptHistory(format!("version {stored} is out of range")))
}

impl Database for DuckDbDatabase {
    fn current_version(&self) -> DbResult<u32> {
        let version: i64 = self
            .conn
            .query_row(
                &format!("SELECT COALESCE(MAX(version), 0) FROM {}", self.history_table),
                [],
                |row| row.get(0),
            )
            .map_err(|e| DbError::ExecutionError(format!("failed to read current version: {e}")))?;
        version_from_sql(version)
    }

    fn load_migrations(&self) -> DbResult<Vec<DbMigration>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT script_name, version, script, checksum, epoch_ms(executed_at)
             FROM {} ORDER BY version",
            self.history_table
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(script_name, version, script, checksum, executed_ms)| {
                let executed_at = DateTime::<Utc>::from_timestamp_millis(executed_ms)
                    .ok_or_else(|| {
                        DbError::CorruptHistory(format!(
                            "invalid execution time {executed_ms} for {script_name}"
                        ))
                    })?;
                Ok(DbMigration::from_history(
                    script_name,
                    version_from_sql(version)?,
                    script,
                    checksum_from_sql(checksum),
                    executed_at,
                ))
            })
            .collect()
    }

    fn update_migration(&self, migration: &DbMigration) -> DbResult<()> {
        log::debug!(
            "Updating history of {} (v{})",
            migration.script_name(),
            migration.version()
        );
        self.record(migration)
    }

    fn apply_migration(&self, migration: &DbMigration) -> DbResult<()> {
        for statement in split_statements(migration.script(), &self.comment_prefix) {
            log::debug!("Executing: {statement}");
            self.conn
                .execute_batch(&statement)
                .map_err(|e| DbError::StatementFailed {
                    script_name: migration.script_name().to_string(),
                    version: migration.version(),
                    statement: statement.clone(),
                    message: e.to_string(),
                })?;
        }
        self.record(migration)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
