//! sw-migrate - Migration orchestration for Seedway
//!
//! Runs one database initialization pass: resolves the baseline version,
//! discovers the default and baseline scripts, injects them into the
//! migration engine's lifecycle, and applies the repair-or-fail policy to a
//! history that contains failed migrations.

pub mod engine;
pub mod error;
pub mod history;
pub mod hooks;
pub mod initializer;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use engine::{MigrationCallback, MigrationEngine, MigrationInfo, MigrationState};
pub use error::{EngineError, EngineResult, MigrateError, MigrateResult};
pub use history::{format_history, log_history};
pub use hooks::{RunnerFactory, ScriptInjector};
pub use initializer::{DatabaseInitializer, PassOutcome, PreparedScripts, SkipReason};
