//! Migration engine collaborator interface
//!
//! The engine owns the versioned schema history and applies pending
//! migrations. Seedway only drives it: it reads the history, sets the
//! baseline, and registers [`MigrationCallback`]s that run on the same
//! connection the engine is using.

use crate::error::EngineResult;
use chrono::{DateTime, Utc};
use std::fmt;
use sw_core::Version;
use sw_db::DbResult;

/// State of one schema history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationState {
    /// Not applied yet
    Pending,
    /// The baseline marker
    Baseline,
    /// Not applied, at or below the baseline
    BelowBaseline,
    /// Not applied, skipped by the engine
    Ignored,
    Success,
    Failed,
    /// Applied successfully but the script is no longer available
    MissingSuccess,
    /// Failed and the script is no longer available
    MissingFailed,
    /// Applied successfully by a newer version of the application
    FutureSuccess,
    /// Failed, applied by a newer version of the application
    FutureFailed,
    /// Applied after a higher version had already been applied
    OutOfOrder,
}

impl MigrationState {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed | Self::MissingFailed | Self::FutureFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Baseline => "Baseline",
            Self::BelowBaseline => "Below Baseline",
            Self::Ignored => "Ignored",
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::MissingSuccess => "Missing",
            Self::MissingFailed => "Failed (Missing)",
            Self::FutureSuccess => "Future",
            Self::FutureFailed => "Failed (Future)",
            Self::OutOfOrder => "Out of Order",
        }
    }
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the engine's migration history
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationInfo {
    /// `None` for entries without a version (e.g. repeatable migrations)
    pub version: Option<Version>,
    pub state: MigrationState,
    pub description: String,
    pub script: String,
    pub installed_on: Option<DateTime<Utc>>,
}

/// Hooks invoked by the engine during its lifecycle
///
/// An error returned from a hook aborts the engine operation that fired it.
pub trait MigrationCallback<C: ?Sized> {
    /// Fired once, before the baseline entry is written
    fn before_baseline(&mut self, _conn: &mut C) -> DbResult<()> {
        Ok(())
    }

    /// Fired after every successful migrate
    fn after_migrate(&mut self, _conn: &mut C) -> DbResult<()> {
        Ok(())
    }
}

/// A versioned migration engine
pub trait MigrationEngine {
    /// Connection handed to callbacks
    type Connection: ?Sized;

    /// Replace the registered callbacks
    fn set_callbacks(&mut self, callbacks: Vec<Box<dyn MigrationCallback<Self::Connection>>>);

    /// Highest applied version, `None` for an empty history
    fn current_version(&self) -> EngineResult<Option<Version>>;

    /// Full history: applied entries and pending migrations
    fn history(&self) -> EngineResult<Vec<MigrationInfo>>;

    fn baseline_version(&self) -> &Version;

    fn set_baseline_version(&mut self, version: Version);

    fn set_baseline_description(&mut self, description: &str);

    /// Write the baseline entry, firing `before_baseline`
    fn baseline(&mut self) -> EngineResult<()>;

    /// Apply pending migrations, firing `after_migrate`; returns how many ran
    fn migrate(&mut self) -> EngineResult<usize>;

    /// Remove failed entries from the history
    fn repair(&mut self) -> EngineResult<()>;
}
