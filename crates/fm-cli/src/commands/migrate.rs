//! Migrate command implementation

use anyhow::Result;
use fm_task::{MigrationTask, Task};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::load_project;

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let repository = project.repository()?;
    let db = project.database()?;

    let mut task = MigrationTask::new(&db, &repository);
    if args.skip_validation {
        task = task.skip_validation();
    }
    let summary = task.execute()?;

    if summary.applied.is_empty() {
        println!(
            "Database is up to date at version {}",
            summary.current_version
        );
        return Ok(());
    }
    for name in &summary.applied {
        println!("  applied  {name}");
    }
    println!(
        "Migrated from version {} to {} ({} script(s))",
        summary.previous_version,
        summary.current_version,
        summary.applied.len()
    );
    Ok(())
}
