//! Error types for sw-migrate

use sw_core::CoreError;
use sw_db::DbError;
use thiserror::Error;

/// Errors reported by a migration engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// A lifecycle callback failed, aborting the engine operation (M001)
    #[error("[M001] Migration callback failed: {0}")]
    Callback(#[source] DbError),

    /// Engine-internal failure (M002)
    #[error("[M002] Migration engine failed: {0}")]
    Engine(String),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort an initialization pass
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The schema history holds a failed migration and repair is disabled (M010)
    #[error("[M010] Failed migration found, version={version}")]
    FailedMigration { version: String },

    /// An injected script failed inside a lifecycle hook (M011)
    #[error("[M011] Database initialization script failed: {0}")]
    ScriptExecution(#[source] DbError),

    /// The migration engine failed (M012)
    #[error("[M012] {0}")]
    Engine(#[source] EngineError),

    /// Script discovery or configuration failed
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;

impl From<EngineError> for MigrateError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Callback(source) => MigrateError::ScriptExecution(source),
            other => MigrateError::Engine(other),
        }
    }
}
