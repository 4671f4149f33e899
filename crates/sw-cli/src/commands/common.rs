//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use sw_core::{Config, FileSystemResourceSpace};

use crate::cli::GlobalArgs;

/// A loaded project: its root directory and configuration
pub(crate) struct ProjectContext {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl ProjectContext {
    /// File-system resource space over the configured roots
    pub(crate) fn resource_space(&self) -> FileSystemResourceSpace {
        self.config.resource_space(&self.root)
    }
}

/// Load the project config from `--config` or the project directory.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<ProjectContext> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => Config::load_from_dir(&root).context("Failed to load project config")?,
    };
    Ok(ProjectContext { root, config })
}
