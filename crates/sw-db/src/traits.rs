//! Script execution traits

use crate::error::DbResult;
use std::fmt;
use sw_core::ScriptReference;

/// A connection that can execute single SQL statements
pub trait SqlConnection {
    /// Execute one statement
    fn execute_statement(&mut self, sql: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Character encoding of script files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl fmt::Display for ScriptEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}

/// How a script runner treats its batch
///
/// The default aborts on the first failing statement and reads UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunnerSettings {
    /// Log failing statements and keep going instead of aborting
    pub continue_on_error: bool,
    /// Encoding used to decode script content
    pub encoding: ScriptEncoding,
}

/// Executes a batch of scripts, in the order added, against one connection
pub trait ScriptRunner<C: ?Sized> {
    fn configure(&mut self, settings: RunnerSettings);

    fn add_script(&mut self, script: ScriptReference);

    /// Run every added script against `conn`
    fn populate(&mut self, conn: &mut C) -> DbResult<()>;
}
