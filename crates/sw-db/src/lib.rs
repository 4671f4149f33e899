//! sw-db - Script execution layer for Seedway
//!
//! This crate provides the `ScriptRunner` and `SqlConnection` traits, the
//! resource-backed `ScriptPopulator`, and a DuckDB connection adapter.

pub mod duckdb;
pub mod error;
pub mod populator;
pub mod splitter;
pub mod traits;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use populator::ScriptPopulator;
pub use splitter::split_statements;
pub use traits::{RunnerSettings, ScriptEncoding, ScriptRunner, SqlConnection};
