//! Validate command implementation

use anyhow::Result;
use fm_db::Database;
use fm_task::{detect_drift, TaskError};

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::{load_project, ExitCode};

/// Execute the validate command
pub(crate) fn execute(_args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let repository = project.repository()?;
    let db = project.database()?;

    let applied = db.load_migrations()?;
    let drift = detect_drift(&applied, &repository)?;
    if drift.is_empty() {
        println!(
            "{} applied migration(s) match their scripts",
            applied.len()
        );
        return Ok(());
    }

    for item in &drift {
        println!("{}", TaskError::from(item.clone()));
    }
    println!();
    println!("{} of {} applied migration(s) drifted", drift.len(), applied.len());
    Err(ExitCode(1).into())
}
