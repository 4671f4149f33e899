//! Shared test doubles for sw-migrate
//!
//! [`InMemoryEngine`] keeps its schema history in memory and fires callbacks
//! the way a real engine does. [`RecordingConnection`] and [`RecordingRunner`]
//! record what they were asked to do.

use crate::engine::{MigrationCallback, MigrationEngine, MigrationInfo, MigrationState};
use crate::error::{EngineError, EngineResult};
use crate::hooks::RunnerFactory;
use chrono::Utc;
use std::cell::RefCell;
use std::rc::Rc;
use sw_core::{ScriptReference, Version};
use sw_db::{DbError, DbResult, RunnerSettings, ScriptRunner, SqlConnection};

/// Connection that records every statement it executes
#[derive(Debug, Default)]
pub struct RecordingConnection {
    pub executed: Vec<String>,
    /// Statements containing this text fail
    pub fail_on: Option<String>,
}

impl RecordingConnection {
    pub fn failing_on(text: &str) -> Self {
        Self {
            executed: Vec::new(),
            fail_on: Some(text.to_string()),
        }
    }
}

impl SqlConnection for RecordingConnection {
    fn execute_statement(&mut self, sql: &str) -> DbResult<()> {
        if let Some(needle) = &self.fail_on {
            if sql.contains(needle.as_str()) {
                return Err(DbError::ExecutionError(format!("rejected: {}", sql)));
            }
        }
        self.executed.push(sql.to_string());
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}

/// Engine operations, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SetCallbacks(usize),
    Baseline(String),
    Repair,
    Migrate,
}

#[derive(Debug, Clone)]
struct PendingMigration {
    version: Version,
    description: String,
    sql: String,
}

/// Migration engine with an in-memory schema history
pub struct InMemoryEngine<C = RecordingConnection> {
    pub conn: C,
    pub calls: Vec<EngineCall>,
    callbacks: Vec<Box<dyn MigrationCallback<C>>>,
    applied: Vec<MigrationInfo>,
    pending: Vec<PendingMigration>,
    baseline_version: Version,
    baseline_description: String,
}

impl<C: SqlConnection> InMemoryEngine<C> {
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            calls: Vec::new(),
            callbacks: Vec::new(),
            applied: Vec::new(),
            pending: Vec::new(),
            baseline_version: Version::parse("1").unwrap(),
            baseline_description: "<< Baseline >>".to_string(),
        }
    }

    /// Add a pending migration; `version` must be a valid version string
    pub fn with_pending(mut self, version: &str, description: &str, sql: &str) -> Self {
        self.pending.push(PendingMigration {
            version: Version::parse(version).unwrap(),
            description: description.to_string(),
            sql: sql.to_string(),
        });
        self.pending.sort_by(|a, b| a.version.cmp(&b.version));
        self
    }

    /// Seed the applied history with one entry
    pub fn with_history(mut self, version: &str, state: MigrationState) -> Self {
        self.applied.push(MigrationInfo {
            version: Some(Version::parse(version).unwrap()),
            state,
            description: format!("seeded {}", version),
            script: format!("V{}__seeded.sql", version),
            installed_on: Some(Utc::now()),
        });
        self
    }

    /// Applied history entries
    pub fn applied(&self) -> &[MigrationInfo] {
        &self.applied
    }

    pub fn call_count(&self, call: &EngineCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    fn is_applied(&self, version: &Version) -> bool {
        self.applied
            .iter()
            .any(|info| info.version.as_ref() == Some(version))
    }

    fn max_applied(&self) -> Option<Version> {
        self.applied
            .iter()
            .filter(|info| !info.state.is_failed())
            .filter_map(|info| info.version.clone())
            .max()
    }

    fn fire(
        &mut self,
        hook: fn(&mut dyn MigrationCallback<C>, &mut C) -> DbResult<()>,
    ) -> EngineResult<()> {
        for callback in self.callbacks.iter_mut() {
            hook(callback.as_mut(), &mut self.conn).map_err(EngineError::Callback)?;
        }
        Ok(())
    }
}

impl<C: SqlConnection> MigrationEngine for InMemoryEngine<C> {
    type Connection = C;

    fn set_callbacks(&mut self, callbacks: Vec<Box<dyn MigrationCallback<C>>>) {
        self.calls.push(EngineCall::SetCallbacks(callbacks.len()));
        self.callbacks = callbacks;
    }

    fn current_version(&self) -> EngineResult<Option<Version>> {
        Ok(self
            .applied
            .iter()
            .filter_map(|info| info.version.clone())
            .max())
    }

    fn history(&self) -> EngineResult<Vec<MigrationInfo>> {
        let current = self.max_applied();
        let mut entries = self.applied.clone();
        for migration in &self.pending {
            if self.is_applied(&migration.version) {
                continue;
            }
            let state = match &current {
                Some(v) if migration.version <= *v => MigrationState::BelowBaseline,
                _ => MigrationState::Pending,
            };
            entries.push(MigrationInfo {
                version: Some(migration.version.clone()),
                state,
                description: migration.description.clone(),
                script: format!("V{}__{}.sql", migration.version, migration.description),
                installed_on: None,
            });
        }
        Ok(entries)
    }

    fn baseline_version(&self) -> &Version {
        &self.baseline_version
    }

    fn set_baseline_version(&mut self, version: Version) {
        self.baseline_version = version;
    }

    fn set_baseline_description(&mut self, description: &str) {
        self.baseline_description = description.to_string();
    }

    fn baseline(&mut self) -> EngineResult<()> {
        self.calls.push(EngineCall::Baseline(self.baseline_version.to_string()));
        if !self.applied.is_empty() {
            return Err(EngineError::Engine(
                "unable to baseline a non-empty schema history".to_string(),
            ));
        }
        self.fire(|cb, conn| cb.before_baseline(conn))?;
        self.applied.push(MigrationInfo {
            version: Some(self.baseline_version.clone()),
            state: MigrationState::Baseline,
            description: self.baseline_description.clone(),
            script: self.baseline_description.clone(),
            installed_on: Some(Utc::now()),
        });
        Ok(())
    }

    fn migrate(&mut self) -> EngineResult<usize> {
        self.calls.push(EngineCall::Migrate);
        if let Some(failed) = self.applied.iter().find(|info| info.state.is_failed()) {
            return Err(EngineError::Engine(format!(
                "schema history contains failed migration {}",
                failed
                    .version
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default()
            )));
        }

        let current = self.max_applied();
        let to_apply: Vec<PendingMigration> = self
            .pending
            .iter()
            .filter(|m| !self.is_applied(&m.version))
            .filter(|m| current.as_ref().map_or(true, |v| m.version > *v))
            .cloned()
            .collect();

        let mut applied = 0;
        for migration in to_apply {
            let result = self.conn.execute_statement(&migration.sql);
            self.applied.push(MigrationInfo {
                version: Some(migration.version.clone()),
                state: if result.is_ok() {
                    MigrationState::Success
                } else {
                    MigrationState::Failed
                },
                description: migration.description.clone(),
                script: format!("V{}__{}.sql", migration.version, migration.description),
                installed_on: Some(Utc::now()),
            });
            if let Err(e) = result {
                return Err(EngineError::Engine(format!(
                    "migration {} failed: {}",
                    migration.version, e
                )));
            }
            applied += 1;
        }

        self.fire(|cb, conn| cb.after_migrate(conn))?;
        Ok(applied)
    }

    fn repair(&mut self) -> EngineResult<()> {
        self.calls.push(EngineCall::Repair);
        self.applied.retain(|info| !info.state.is_failed());
        Ok(())
    }
}

/// What a [`RecordingRunner`] was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerEvent {
    Configure(RunnerSettings),
    Add(String),
    Populate,
}

/// Shared event log of every runner a factory produced
pub type RunnerLog = Rc<RefCell<Vec<RunnerEvent>>>;

/// Script runner that records its calls instead of executing anything
pub struct RecordingRunner {
    events: RunnerLog,
    fail_populate: bool,
}

impl RecordingRunner {
    /// Factory whose runners append to `events`
    pub fn factory<C: ?Sized + 'static>(events: RunnerLog) -> RunnerFactory<C> {
        Rc::new(move || {
            Box::new(RecordingRunner {
                events: Rc::clone(&events),
                fail_populate: false,
            }) as Box<dyn ScriptRunner<C>>
        })
    }

    /// Factory whose runners fail in `populate`
    pub fn failing_factory<C: ?Sized + 'static>(events: RunnerLog) -> RunnerFactory<C> {
        Rc::new(move || {
            Box::new(RecordingRunner {
                events: Rc::clone(&events),
                fail_populate: true,
            }) as Box<dyn ScriptRunner<C>>
        })
    }

    /// Locations added across all runners, in order
    pub fn added(events: &RunnerLog) -> Vec<String> {
        events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RunnerEvent::Add(location) => Some(location.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<C: ?Sized> ScriptRunner<C> for RecordingRunner {
    fn configure(&mut self, settings: RunnerSettings) {
        self.events.borrow_mut().push(RunnerEvent::Configure(settings));
    }

    fn add_script(&mut self, script: ScriptReference) {
        self.events
            .borrow_mut()
            .push(RunnerEvent::Add(script.location().to_string()));
    }

    fn populate(&mut self, _conn: &mut C) -> DbResult<()> {
        self.events.borrow_mut().push(RunnerEvent::Populate);
        if self.fail_populate {
            return Err(DbError::ExecutionError("populate failed".to_string()));
        }
        Ok(())
    }
}
