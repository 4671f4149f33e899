//! DuckDB connection adapter

use crate::error::{DbError, DbResult};
use crate::traits::SqlConnection;
use duckdb::Connection;
use std::path::Path;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Connection,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self { conn })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Check whether a table or view exists in the `main` schema
    pub fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'main' AND table_name = ?",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl SqlConnection for DuckDbBackend {
    fn execute_statement(&mut self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
