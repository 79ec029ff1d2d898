//! Status command implementation

use anyhow::{Context, Result};
use fm_core::DbMigration;
use fm_db::Database;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::load_project;

/// State of one migration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MigrationState {
    Applied,
    Pending,
    /// Applied, but its script no longer exists
    Missing,
}

impl std::fmt::Display for MigrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationState::Applied => write!(f, "applied"),
            MigrationState::Pending => write!(f, "pending"),
            MigrationState::Missing => write!(f, "missing"),
        }
    }
}

/// One row of the status listing
#[derive(Debug, Serialize)]
pub(crate) struct StatusRow {
    version: u32,
    script_name: String,
    state: MigrationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    executed_at: Option<String>,
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let repository = project.repository()?;
    let db = project.database()?;

    let applied = db.load_migrations()?;
    let scripts: Vec<(u32, &str)> = repository
        .scripts()
        .iter()
        .map(|s| (s.version, s.script_name.as_str()))
        .collect();
    let rows = build_rows(&scripts, &applied);

    match args.output {
        StatusOutput::Table => print_table(&rows),
        StatusOutput::Json => print_json(&rows)?,
    }
    Ok(())
}

/// Merge repository scripts and history records into one list ordered by version.
pub(crate) fn build_rows(scripts: &[(u32, &str)], applied: &[DbMigration]) -> Vec<StatusRow> {
    let mut rows: BTreeMap<u32, StatusRow> = scripts
        .iter()
        .map(|(version, name)| {
            (
                *version,
                StatusRow {
                    version: *version,
                    script_name: name.to_string(),
                    state: MigrationState::Pending,
                    executed_at: None,
                },
            )
        })
        .collect();

    for record in applied {
        let executed_at = record.executed_at().map(|at| at.to_rfc3339());
        rows.entry(record.version())
            .and_modify(|row| {
                row.state = MigrationState::Applied;
                row.executed_at = executed_at.clone();
            })
            .or_insert_with(|| StatusRow {
                version: record.version(),
                script_name: record.script_name().to_string(),
                state: MigrationState::Missing,
                executed_at: executed_at.clone(),
            });
    }
    rows.into_values().collect()
}

fn print_table(rows: &[StatusRow]) {
    if rows.is_empty() {
        println!("No migrations found");
        return;
    }
    let name_width = rows
        .iter()
        .map(|r| r.script_name.len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!(
        "{:>10}  {:<name_width$}  {:<8}  EXECUTED_AT",
        "VERSION", "SCRIPT", "STATE"
    );
    println!(
        "{:->10}  {:-<name_width$}  {:-<8}  {}",
        "",
        "",
        "",
        "-".repeat(25)
    );
    for row in rows {
        println!(
            "{:>10}  {:<name_width$}  {:<8}  {}",
            row.version,
            row.script_name,
            row.state,
            row.executed_at.as_deref().unwrap_or("-")
        );
    }

    let pending = rows
        .iter()
        .filter(|r| r.state == MigrationState::Pending)
        .count();
    println!();
    println!("{} migrations, {} pending", rows.len(), pending);
}

fn print_json(rows: &[StatusRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
