//! Migration history log formatting

use crate::engine::{MigrationEngine, MigrationInfo};
use std::fmt::Write;

/// Render the history as one header line plus one tab-indented line per entry:
/// `version - state - description - script - installed_on`
pub fn format_history(database_name: &str, entries: &[MigrationInfo]) -> String {
    let mut out = format!("Database - {}: \n", database_name);
    for entry in entries {
        let version = entry
            .version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "none".to_string());
        let installed_on = entry
            .installed_on
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "none".to_string());
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "\t{} - {} - {} - {} - {}",
            version, entry.state, entry.description, entry.script, installed_on
        );
    }
    out
}

/// Log the engine's full history at info level.
///
/// A failure to read the history is logged rather than returned so that it
/// never masks the outcome of the pass.
pub fn log_history<E: MigrationEngine + ?Sized>(database_name: &str, engine: &E) {
    match engine.history() {
        Ok(entries) => log::info!("{}", format_history(database_name, &entries)),
        Err(e) => log::warn!("Could not read migration history: {}", e),
    }
}
