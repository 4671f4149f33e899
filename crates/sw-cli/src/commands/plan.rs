//! Plan command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sw_core::ScriptGroupKind;
use sw_migrate::{DatabaseInitializer, PreparedScripts};

use super::common::load_project;
use crate::cli::{GlobalArgs, PlanArgs, PlanOutput};

/// What an initialization pass would inject
#[derive(Debug, Serialize)]
pub(crate) struct PlanReport {
    pub(crate) database_name: String,
    pub(crate) enabled: bool,
    pub(crate) only_patches: bool,
    pub(crate) baseline: Option<String>,
    pub(crate) groups: Vec<GroupReport>,
}

/// Scripts of one group, in execution order
#[derive(Debug, Serialize)]
pub(crate) struct GroupReport {
    pub(crate) group: ScriptGroupKind,
    pub(crate) scripts: Vec<String>,
}

/// Execute the plan command
pub(crate) fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let space = project.resource_space();
    let prepared = DatabaseInitializer::new(&project.config)
        .init_scripts(&space)
        .context("Failed to discover initialization scripts")?;

    let report = build_report(&project.config, &prepared);
    match args.output {
        PlanOutput::Table => print!("{}", format_table(&report)),
        PlanOutput::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

pub(crate) fn build_report(config: &sw_core::Config, prepared: &PreparedScripts) -> PlanReport {
    PlanReport {
        database_name: config.database_name.clone(),
        enabled: config.enabled,
        only_patches: config.only_patches,
        baseline: prepared.baseline.as_ref().map(ToString::to_string),
        groups: prepared
            .groups
            .iter()
            .map(|(group, scripts)| GroupReport {
                group,
                scripts: scripts.iter().map(|s| s.location().to_string()).collect(),
            })
            .collect(),
    }
}

pub(crate) fn format_table(report: &PlanReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Database:         {}\n", report.database_name));
    out.push_str(&format!("Enabled:          {}\n", report.enabled));
    out.push_str(&format!("Only patches:     {}\n", report.only_patches));
    out.push_str(&format!(
        "Baseline version: {}\n\n",
        report.baseline.as_deref().unwrap_or("none")
    ));

    let width = ScriptGroupKind::ALL
        .iter()
        .map(|kind| kind.as_str().len())
        .max()
        .unwrap_or(0);
    out.push_str(&format!("{:<width$}  SCRIPT\n", "GROUP", width = width));
    out.push_str(&format!("{}  {}\n", "-".repeat(width), "-".repeat(6)));
    for group in &report.groups {
        if group.scripts.is_empty() {
            out.push_str(&format!("{:<width$}  -\n", group.group.as_str(), width = width));
        }
        for script in &group.scripts {
            out.push_str(&format!(
                "{:<width$}  {}\n",
                group.group.as_str(),
                script,
                width = width
            ));
        }
    }
    out
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
