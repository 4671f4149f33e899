//! Script injection hooks
//!
//! [`ScriptInjector`] is the callback registered on the migration engine.
//! Both hooks close over the same state: the discovered script groups and a
//! shared flag recording whether `before_baseline` fired during this pass.

use crate::engine::MigrationCallback;
use std::cell::Cell;
use std::rc::Rc;
use sw_core::{ScriptGroupKind, ScriptGroups};
use sw_db::{DbResult, RunnerSettings, ScriptEncoding, ScriptRunner};

/// Creates a fresh script runner for each batch
pub type RunnerFactory<C> = Rc<dyn Fn() -> Box<dyn ScriptRunner<C>>>;

/// Groups run by `before_baseline`, in order
const BASELINE_GROUPS: [ScriptGroupKind; 3] = [
    ScriptGroupKind::Default,
    ScriptGroupKind::Baseline,
    ScriptGroupKind::BaselineData,
];

/// Runs default and baseline scripts around the engine's lifecycle
pub struct ScriptInjector<C: ?Sized> {
    scripts: Rc<ScriptGroups>,
    only_patches: bool,
    runner: RunnerFactory<C>,
    baselined: Rc<Cell<bool>>,
}

impl<C: ?Sized> ScriptInjector<C> {
    pub fn new(scripts: Rc<ScriptGroups>, only_patches: bool, runner: RunnerFactory<C>) -> Self {
        Self {
            scripts,
            only_patches,
            runner,
            baselined: Rc::new(Cell::new(false)),
        }
    }

    /// Flag set once `before_baseline` has fired
    pub fn baselined_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.baselined)
    }

    /// Run one group as a single batch; empty groups are skipped.
    fn run_scripts(&self, kind: ScriptGroupKind, conn: &mut C) -> DbResult<()> {
        let scripts = self.scripts.get(kind);
        if scripts.is_empty() {
            return Ok(());
        }

        let mut runner = (self.runner)();
        runner.configure(RunnerSettings {
            continue_on_error: false,
            encoding: ScriptEncoding::Utf8,
        });
        for script in scripts {
            log::info!("Preparing SQL script: {}", script);
            runner.add_script(script.clone());
        }
        runner.populate(conn)
    }
}

impl<C: ?Sized> MigrationCallback<C> for ScriptInjector<C> {
    fn before_baseline(&mut self, conn: &mut C) -> DbResult<()> {
        self.baselined.set(true);
        if self.only_patches {
            log::info!("Skipping non-patch database initialization scripts");
            return Ok(());
        }
        if BASELINE_GROUPS
            .iter()
            .all(|kind| self.scripts.get(*kind).is_empty())
        {
            log::info!("No database initialization scripts found");
            return Ok(());
        }
        for kind in BASELINE_GROUPS {
            self.run_scripts(kind, conn)?;
        }
        Ok(())
    }

    fn after_migrate(&mut self, conn: &mut C) -> DbResult<()> {
        if self.baselined.get() && !self.only_patches {
            self.run_scripts(ScriptGroupKind::DefaultData, conn)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
