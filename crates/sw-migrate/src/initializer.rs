//! The database initialization pass
//!
//! One pass discovers the injected scripts, registers the [`ScriptInjector`]
//! on the engine, baselines an empty schema, checks the history for failed
//! migrations, and migrates. The history is logged at the end of every pass
//! that reaches the engine, whether it succeeded or not.

use crate::engine::{MigrationCallback, MigrationEngine};
use crate::error::{MigrateError, MigrateResult};
use crate::history::{format_history, log_history};
use crate::hooks::{RunnerFactory, ScriptInjector};
use std::cell::Cell;
use std::rc::Rc;
use sw_core::{
    classify_scripts, resolve_baseline, Config, CoreResult, ResourceSpace, ScriptGroups, Version,
};

/// Baseline version and script groups computed once per pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedScripts {
    pub baseline: Option<Version>,
    pub groups: ScriptGroups,
}

/// Why a pass did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `enabled` is false
    Disabled,
    /// No engine / data connection was supplied
    NoDataSource,
}

/// Result of a pass that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Skipped(SkipReason),
    Completed {
        /// The baseline entry was written during this pass
        baselined: bool,
        /// Failed history entries were repaired before migrating
        repaired: bool,
        /// Migrations applied by the engine
        applied: usize,
    },
}

/// Drives the migration engine through one initialization pass
pub struct DatabaseInitializer<'a> {
    config: &'a Config,
}

impl<'a> DatabaseInitializer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolve the baseline version, then discover the four script groups.
    pub fn init_scripts<S: ResourceSpace + ?Sized>(
        &self,
        space: &S,
    ) -> CoreResult<PreparedScripts> {
        let directive = self.config.baseline_directive()?;
        let layout = self.config.script_layout();
        let baseline = resolve_baseline(
            &directive,
            &layout.prefix,
            &layout.platform,
            &layout.location,
            space,
        )?;
        let groups = classify_scripts(space, &layout, baseline.as_ref())?;
        Ok(PreparedScripts { baseline, groups })
    }

    /// Full pass: discovery followed by [`migrate`](Self::migrate).
    ///
    /// Disabled configurations and missing engines are skipped before any
    /// script is discovered.
    pub fn run<S, E>(
        &self,
        space: &S,
        engine: Option<&mut E>,
        runner: RunnerFactory<E::Connection>,
    ) -> MigrateResult<PassOutcome>
    where
        S: ResourceSpace + ?Sized,
        E: MigrationEngine + ?Sized,
        E::Connection: 'static,
    {
        if let Some(reason) = self.skip_reason(engine.is_some()) {
            return Ok(PassOutcome::Skipped(reason));
        }
        let scripts = self.init_scripts(space)?;
        self.migrate(engine, scripts, runner)
    }

    /// Baseline if needed, apply the failure policy, and migrate.
    pub fn migrate<E>(
        &self,
        engine: Option<&mut E>,
        scripts: PreparedScripts,
        runner: RunnerFactory<E::Connection>,
    ) -> MigrateResult<PassOutcome>
    where
        E: MigrationEngine + ?Sized,
        E::Connection: 'static,
    {
        if let Some(reason) = self.skip_reason(engine.is_some()) {
            return Ok(PassOutcome::Skipped(reason));
        }
        let Some(engine) = engine else {
            return Ok(PassOutcome::Skipped(SkipReason::NoDataSource));
        };

        log::info!("Starting database migration");
        let injector =
            ScriptInjector::new(Rc::new(scripts.groups), self.config.only_patches, runner);
        let baselined = injector.baselined_flag();
        let callback: Box<dyn MigrationCallback<E::Connection>> = Box::new(injector);
        engine.set_callbacks(vec![callback]);

        let result = self.run_pass(engine, scripts.baseline, &baselined);
        log_history(&self.config.database_name, engine);
        result
    }

    fn skip_reason(&self, has_engine: bool) -> Option<SkipReason> {
        if !self.config.enabled {
            log::info!("Database auto-migration is not enabled");
            return Some(SkipReason::Disabled);
        }
        if !has_engine {
            log::warn!("No data source configured, skipping database initialization");
            return Some(SkipReason::NoDataSource);
        }
        None
    }

    fn run_pass<E: MigrationEngine + ?Sized>(
        &self,
        engine: &mut E,
        baseline: Option<Version>,
        baselined: &Cell<bool>,
    ) -> MigrateResult<PassOutcome> {
        if engine.current_version()?.is_none() {
            let version = match baseline {
                Some(version) => version,
                None => self.config.default_baseline()?,
            };
            engine.set_baseline_version(version);
            engine.set_baseline_description(&self.config.baseline_description);
            log::info!("Database baseline version: {}", engine.baseline_version());
            engine.baseline()?;
        }

        let history = engine.history()?;
        let mut repaired = false;
        if let Some(failed) = history.iter().find(|info| info.state.is_failed()) {
            log::info!("{}", format_history(&self.config.database_name, &history));
            if !self.config.repair_on_migrate {
                return Err(MigrateError::FailedMigration {
                    version: failed
                        .version
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "none".to_string()),
                });
            }
            log::warn!("Repairing previously failed migrations");
            engine.repair()?;
            log::warn!("Finished repairing failed migrations");
            repaired = true;
        }

        let applied = engine.migrate()?;
        log::info!("Finished database migration");
        Ok(PassOutcome::Completed {
            baselined: baselined.get(),
            repaired,
            applied,
        })
    }
}

#[cfg(test)]
#[path = "initializer_test.rs"]
mod tests;
