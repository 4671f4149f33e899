//! Run command implementation

use anyhow::{Context, Result};
use sw_db::{DuckDbBackend, RunnerSettings, ScriptPopulator, ScriptRunner};
use sw_migrate::DatabaseInitializer;

use super::common::load_project;
use crate::cli::{GlobalArgs, RunArgs};

/// Execute the run command
pub(crate) fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let space = project.resource_space();
    let prepared = DatabaseInitializer::new(&project.config)
        .init_scripts(&space)
        .context("Failed to discover initialization scripts")?;

    let scripts = prepared.groups.get(args.group);
    if scripts.is_empty() {
        println!("No scripts in group '{}'", args.group);
        return Ok(());
    }

    let db_path = args
        .database
        .as_deref()
        .unwrap_or(&project.config.database.path);
    let mut db = DuckDbBackend::new(db_path)
        .with_context(|| format!("Failed to open database: {}", db_path))?;

    let mut populator = ScriptPopulator::new(&space);
    ScriptRunner::<DuckDbBackend>::configure(
        &mut populator,
        RunnerSettings {
            continue_on_error: args.continue_on_error,
            encoding: args.encoding.into(),
        },
    );
    for script in scripts {
        log::info!("Preparing SQL script: {}", script);
        ScriptRunner::<DuckDbBackend>::add_script(&mut populator, script.clone());
    }
    populator
        .populate(&mut db)
        .with_context(|| format!("Failed to run '{}' scripts", args.group))?;

    println!(
        "Executed {} script(s) from group '{}' against {}",
        scripts.len(),
        args.group,
        db_path
    );
    Ok(())
}
