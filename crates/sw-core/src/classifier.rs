//! Script classification
//!
//! Builds the location patterns for the four script groups and resolves them
//! through the locator. For a base name `init`, platform `mysql` and location
//! `db`, the patterns are tried in this order:
//!
//! ```text
//! db/init.sql          db/init-mysql.sql
//! db/init.*.sql        db/init-mysql.*.sql
//! db/init$*.sql        db/init-mysql$*.sql
//! ```
//!
//! (left column first). Data groups use `{base}-data` with the three
//! non-platform forms only. Baseline groups use `{prefix}{version}` as the
//! base name.

use crate::error::CoreResult;
use crate::resource::{join_location, locate, LocationPattern, ResourceSpace, ScriptReference};
use crate::version::Version;
use glob::Pattern;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Where and how scripts are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLayout {
    /// Directory-like location searched in the resource space
    pub location: String,
    /// Prefix of versioned scripts, e.g. `V`
    pub prefix: String,
    /// Platform suffix, e.g. `mysql`
    pub platform: String,
    /// Base name of the default scripts, e.g. `init`
    pub default_script: Option<String>,
}

/// The four kinds of injected scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptGroupKind {
    Default,
    DefaultData,
    Baseline,
    BaselineData,
}

impl ScriptGroupKind {
    /// All kinds, in classification order
    pub const ALL: [ScriptGroupKind; 4] = [
        Self::Default,
        Self::DefaultData,
        Self::Baseline,
        Self::BaselineData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::DefaultData => "default-data",
            Self::Baseline => "baseline",
            Self::BaselineData => "baseline-data",
        }
    }
}

impl fmt::Display for ScriptGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptGroupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown script group '{}', expected one of: default, default-data, baseline, baseline-data",
                    s
                )
            })
    }
}

/// Discovered scripts, grouped by kind. Order within a group is execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptGroups {
    pub default: Vec<ScriptReference>,
    pub default_data: Vec<ScriptReference>,
    pub baseline: Vec<ScriptReference>,
    pub baseline_data: Vec<ScriptReference>,
}

impl ScriptGroups {
    pub fn get(&self, kind: ScriptGroupKind) -> &[ScriptReference] {
        match kind {
            ScriptGroupKind::Default => &self.default,
            ScriptGroupKind::DefaultData => &self.default_data,
            ScriptGroupKind::Baseline => &self.baseline,
            ScriptGroupKind::BaselineData => &self.baseline_data,
        }
    }

    /// True when no group has any script
    pub fn is_empty(&self) -> bool {
        ScriptGroupKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }

    /// Total number of scripts across all groups
    pub fn len(&self) -> usize {
        ScriptGroupKind::ALL.iter().map(|kind| self.get(*kind).len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScriptGroupKind, &[ScriptReference])> {
        ScriptGroupKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

fn exact(location: &str, file: String) -> LocationPattern {
    LocationPattern::Exact(join_location(location, &file))
}

fn wildcard(location: &str, base: &str, tail: &str) -> LocationPattern {
    LocationPattern::Wildcard(join_location(
        &Pattern::escape(location),
        &format!("{}{}", Pattern::escape(base), tail),
    ))
}

/// `{base}.sql`, `{base}.*.sql`, `{base}$*.sql`
fn base_patterns(location: &str, base: &str) -> [LocationPattern; 3] {
    [
        exact(location, format!("{}.sql", base)),
        wildcard(location, base, ".*.sql"),
        wildcard(location, base, "$*.sql"),
    ]
}

/// Base forms, then the same forms with `-{platform}` appended to the base
pub fn script_patterns(location: &str, base: &str, platform: &str) -> Vec<LocationPattern> {
    let mut patterns = base_patterns(location, base).to_vec();
    if !platform.trim().is_empty() {
        patterns.extend(base_patterns(location, &format!("{}-{}", base, platform)));
    }
    patterns
}

/// Base forms of `{base}-data`
pub fn data_patterns(location: &str, base: &str) -> Vec<LocationPattern> {
    base_patterns(location, &format!("{}-data", base)).to_vec()
}

/// Discover the default and baseline script groups.
///
/// Without a default base name the default groups are empty; without a
/// baseline version the baseline groups are empty.
pub fn classify_scripts<S: ResourceSpace + ?Sized>(
    space: &S,
    layout: &ScriptLayout,
    baseline: Option<&Version>,
) -> CoreResult<ScriptGroups> {
    let mut groups = ScriptGroups::default();

    if let Some(base) = layout
        .default_script
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
    {
        groups.default = locate(space, &script_patterns(&layout.location, base, &layout.platform))?;
        groups.default_data = locate(space, &data_patterns(&layout.location, base))?;
    }

    if let Some(version) = baseline {
        let base = format!("{}{}", layout.prefix, version.as_str());
        groups.baseline = locate(
            space,
            &script_patterns(&layout.location, &base, &layout.platform),
        )?;
        groups.baseline_data = locate(space, &data_patterns(&layout.location, &base))?;
    }

    for (kind, scripts) in groups.iter() {
        log::debug!("{} scripts: {}", kind, scripts.len());
    }
    Ok(groups)
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
