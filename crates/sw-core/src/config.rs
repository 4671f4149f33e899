//! Configuration types and parsing for seedway.yml

use crate::classifier::ScriptLayout;
use crate::error::{CoreError, CoreResult};
use crate::resolver::BaselineDirective;
use crate::resource::FileSystemResourceSpace;
use crate::serde_helpers::default_true;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names tried by [`Config::load_from_dir`]
pub const CONFIG_FILE_NAMES: [&str; 2] = ["seedway.yml", "seedway.yaml"];

/// Database initializer configuration from seedway.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Master switch; when false the initialization pass does nothing
    #[serde(default)]
    pub enabled: bool,

    /// Only run patch migrations; never inject default or baseline scripts
    #[serde(default = "default_true")]
    pub only_patches: bool,

    /// Label used in the migration history log
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Repair a failed migration history instead of aborting
    #[serde(default)]
    pub repair_on_migrate: bool,

    /// Baseline directive: a version, `auto`, or `none`
    #[serde(default)]
    pub baseline: Option<String>,

    /// Baseline written when no baseline version could be resolved
    #[serde(default = "default_baseline_version")]
    pub default_baseline_version: String,

    /// Description written with the baseline entry
    #[serde(default = "default_baseline_description")]
    pub baseline_description: String,

    /// Location of the scripts inside each resource root
    #[serde(default = "default_script_location")]
    pub script_location: String,

    /// Prefix of versioned scripts
    #[serde(default = "default_script_prefix")]
    pub script_prefix: String,

    /// Base name of the default (seed) scripts
    #[serde(default)]
    pub default_script: Option<String>,

    /// Platform suffix for platform-specific scripts
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Directories searched for scripts, in order
    #[serde(default = "default_resource_roots")]
    pub resource_roots: Vec<String>,

    /// Database connection used by the CLI
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB database path (`:memory:` for in-memory)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_database_name() -> String {
    "kaola".to_string()
}

fn default_baseline_version() -> String {
    "1".to_string()
}

fn default_baseline_description() -> String {
    "(BASELINE)".to_string()
}

fn default_script_location() -> String {
    "db/migration".to_string()
}

fn default_script_prefix() -> String {
    "V".to_string()
}

fn default_platform() -> String {
    "all".to_string()
}

fn default_resource_roots() -> Vec<String> {
    vec![".".to_string()]
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: false,
            only_patches: true,
            database_name: default_database_name(),
            repair_on_migrate: false,
            baseline: None,
            default_baseline_version: default_baseline_version(),
            baseline_description: default_baseline_description(),
            script_location: default_script_location(),
            script_prefix: default_script_prefix(),
            default_script: None,
            platform: default_platform(),
            resource_roots: default_resource_roots(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory (looks for seedway.yml or seedway.yaml)
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map(|path| Self::load(&path))
            .unwrap_or_else(|| {
                Err(CoreError::ConfigNotFound {
                    path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                })
            })
    }

    /// Validate configuration
    fn validate(&self) -> CoreResult<()> {
        if self.script_prefix.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "script_prefix must not be empty".to_string(),
            });
        }
        if self.resource_roots.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "resource_roots must list at least one directory".to_string(),
            });
        }
        self.default_baseline()?;
        self.baseline_directive()?;
        Ok(())
    }

    /// Parsed `baseline` directive
    pub fn baseline_directive(&self) -> CoreResult<BaselineDirective> {
        BaselineDirective::parse(self.baseline.as_deref())
    }

    /// Parsed `default_baseline_version`
    pub fn default_baseline(&self) -> CoreResult<Version> {
        Version::parse(self.default_baseline_version.trim())
    }

    /// Script naming derived from this configuration
    pub fn script_layout(&self) -> ScriptLayout {
        ScriptLayout {
            location: self.script_location.clone(),
            prefix: self.script_prefix.clone(),
            platform: self.platform.clone(),
            default_script: self.default_script.clone(),
        }
    }

    /// Resource roots resolved against the project root
    pub fn resource_roots_absolute(&self, root: &Path) -> Vec<PathBuf> {
        self.resource_roots.iter().map(|p| root.join(p)).collect()
    }

    /// File-system resource space over the configured roots
    pub fn resource_space(&self, root: &Path) -> FileSystemResourceSpace {
        FileSystemResourceSpace::new(self.resource_roots_absolute(root))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
