//! Resource-backed script runner

use crate::error::{DbError, DbResult};
use crate::splitter::split_statements;
use crate::traits::{RunnerSettings, ScriptEncoding, ScriptRunner, SqlConnection};
use sw_core::{ResourceSpace, ScriptReference};

/// Reads scripts from a resource space and executes them statement by
/// statement against a [`SqlConnection`]
pub struct ScriptPopulator<S> {
    space: S,
    settings: RunnerSettings,
    scripts: Vec<ScriptReference>,
}

impl<S: ResourceSpace> ScriptPopulator<S> {
    pub fn new(space: S) -> Self {
        Self {
            space,
            settings: RunnerSettings::default(),
            scripts: Vec::new(),
        }
    }

    /// Scripts added so far, in execution order
    pub fn scripts(&self) -> &[ScriptReference] {
        &self.scripts
    }

    pub fn settings(&self) -> RunnerSettings {
        self.settings
    }

    /// Read and decode one script
    fn load(&self, script: &ScriptReference) -> DbResult<String> {
        let bytes = self.space.read(script).map_err(|e| DbError::ScriptRead {
            script: script.to_string(),
            source: e,
        })?;
        let text = match self.settings.encoding {
            ScriptEncoding::Utf8 => {
                String::from_utf8(bytes).map_err(|_| DbError::ScriptEncoding {
                    script: script.to_string(),
                    encoding: self.settings.encoding.to_string(),
                })?
            }
            ScriptEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        };
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

impl<S, C> ScriptRunner<C> for ScriptPopulator<S>
where
    S: ResourceSpace,
    C: SqlConnection + ?Sized,
{
    fn configure(&mut self, settings: RunnerSettings) {
        self.settings = settings;
    }

    fn add_script(&mut self, script: ScriptReference) {
        self.scripts.push(script);
    }

    fn populate(&mut self, conn: &mut C) -> DbResult<()> {
        for script in &self.scripts {
            let sql = self.load(script)?;
            let statements = split_statements(&sql);
            log::debug!(
                "Executing SQL script {} ({} statements) on {}",
                script,
                statements.len(),
                conn.db_type()
            );

            for statement in statements {
                if let Err(e) = conn.execute_statement(&statement) {
                    if self.settings.continue_on_error {
                        log::warn!("Failed to execute statement in {}: {}", script, e);
                        continue;
                    }
                    return Err(DbError::ScriptExecution {
                        script: script.to_string(),
                        statement,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "populator_test.rs"]
mod tests;
