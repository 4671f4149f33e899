//! sw-core - Core library for Seedway
//!
//! This crate provides configuration parsing, migration version tokens, the
//! resource space abstraction used to discover SQL scripts, baseline version
//! resolution, and classification of scripts into the default and baseline
//! groups that the migration orchestrator injects.

pub mod classifier;
pub mod config;
pub mod error;
pub mod resolver;
pub mod resource;
pub(crate) mod serde_helpers;
pub mod version;

pub use classifier::{classify_scripts, ScriptGroupKind, ScriptGroups, ScriptLayout};
pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use resolver::{resolve_baseline, BaselineDirective};
pub use resource::{
    locate, FileSystemResourceSpace, LocationPattern, MemoryResourceSpace, ResourceSpace,
    ScriptReference,
};
pub use version::Version;
