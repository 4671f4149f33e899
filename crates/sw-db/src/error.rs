//! Error types for sw-db

use thiserror::Error;

/// Script execution errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// A statement inside a script failed (D003)
    #[error("[D003] SQL script {script} failed at statement `{statement}`: {message}")]
    ScriptExecution {
        script: String,
        statement: String,
        message: String,
    },

    /// Script content could not be read (D004)
    #[error("[D004] Cannot read SQL script {script}: {source}")]
    ScriptRead {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// Script content is not valid in the configured encoding (D005)
    #[error("[D005] SQL script {script} is not valid {encoding}")]
    ScriptEncoding { script: String, encoding: String },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
