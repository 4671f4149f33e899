//! Migration version tokens
//!
//! A [`Version`] is a dot-separated list of numeric components parsed from a
//! script filename or a configured baseline. Underscores are accepted as
//! separators and normalised to dots, so `1_10` and `1.10` are the same
//! version and render the same way.
//!
//! Ordering is numeric per component (`1.10 > 1.2`), and trailing zero
//! components are not significant (`1.0 == 1`), which keeps equality and
//! ordering consistent with the migration engine's own version semantics.
//! Components have no size limit, so timestamp-style versions such as
//! `202401011200003000000` parse like any other.

use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// One numeric component: decimal digits without leading zeros (`0` for zero)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Component(String);

impl Component {
    fn new(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Self(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
    }

    fn is_zero(&self) -> bool {
        self.0 == "0"
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        // Without leading zeros, the longer digit string is the larger number
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

/// A parsed, totally ordered migration version
#[derive(Debug, Clone)]
pub struct Version {
    /// Numeric components with trailing zeros removed
    parts: Vec<Component>,
    /// Canonical string form (`_` replaced by `.`)
    text: String,
}

impl Version {
    /// Parse a version string such as `1`, `1.2.3` or `2_0_1`.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidVersion {
            version: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("version must not be empty"));
        }

        let text = input.replace('_', ".");
        let mut parts = Vec::new();
        for component in text.split('.') {
            if component.is_empty() {
                return Err(invalid("empty version component"));
            }
            if !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(
                    "version may only contain 0..9 and . (dot) or _ (underscore)",
                ));
            }
            parts.push(Component::new(component));
        }

        while parts.len() > 1 && parts.last().is_some_and(Component::is_zero) {
            parts.pop();
        }

        Ok(Self { parts, text })
    }

    /// Canonical string form, used to build baseline script names.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Numeric components as digit strings, leading and trailing zeros removed.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|c| c.0.as_str())
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // With trailing zeros stripped, a strict prefix is always the smaller
        // version, so slice ordering is numeric ordering.
        self.parts.cmp(&other.parts)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
