//! Checksum command implementation

use anyhow::Result;
use fm_task::{CalculateChecksumTask, Task};

use crate::cli::{ChecksumArgs, GlobalArgs};
use crate::commands::common::load_project;

/// Execute the checksum command
pub(crate) fn execute(args: &ChecksumArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = project.database()?;

    let repository = if args.from_scripts {
        Some(project.repository()?)
    } else {
        None
    };
    let mut task = CalculateChecksumTask::new(&db);
    if let Some(repository) = &repository {
        task = task.with_repository(repository);
    }

    match task.execute() {
        Ok(summary) => {
            println!(
                "Recalculated {} checksum(s), {} changed",
                summary.updated, summary.changed
            );
            Ok(())
        }
        Err(err) => {
            eprintln!(
                "Checksum update stopped early; records before the failure were already updated"
            );
            Err(err.into())
        }
    }
}
