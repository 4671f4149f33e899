//! Baseline directive parsing and baseline version resolution

use crate::error::{CoreError, CoreResult};
use crate::resource::{join_location, locate, LocationPattern, ResourceSpace};
use crate::version::Version;
use glob::Pattern;
use regex::Regex;

/// Keyword selecting the highest versioned script as the baseline
pub const BASELINE_AUTO: &str = "auto";

/// Keyword disabling baseline resolution
pub const BASELINE_NONE: &str = "none";

/// How the baseline version is chosen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BaselineDirective {
    /// A configured version
    Explicit(Version),
    /// Highest version among the versioned scripts
    Auto,
    /// Explicitly switched off (`none`)
    Disabled,
    /// Nothing configured
    #[default]
    Unset,
}

impl BaselineDirective {
    /// Parse the configured `baseline` value.
    ///
    /// Blank or absent means [`Unset`](Self::Unset); `auto` and `none` are
    /// matched case-insensitively; anything else must be a valid version.
    pub fn parse(value: Option<&str>) -> CoreResult<Self> {
        let value = match value.map(str::trim) {
            None => return Ok(Self::Unset),
            Some(v) if v.is_empty() => return Ok(Self::Unset),
            Some(v) => v,
        };
        if value.eq_ignore_ascii_case(BASELINE_AUTO) {
            Ok(Self::Auto)
        } else if value.eq_ignore_ascii_case(BASELINE_NONE) {
            Ok(Self::Disabled)
        } else {
            Version::parse(value).map(Self::Explicit)
        }
    }
}

/// Filename pattern recognised by `auto` resolution:
/// `{prefix}{version}[-{platform}][${suffix}].sql`
fn versioned_script_regex(prefix: &str, platform: &str) -> CoreResult<Regex> {
    let platform_group = if platform.is_empty() {
        String::new()
    } else {
        format!("(-{})?", regex::escape(platform))
    };
    let source = format!(
        r"^.*{}([0-9_.]+){}([$].*)?\.sql$",
        regex::escape(prefix),
        platform_group
    );
    Regex::new(&source).map_err(|e| CoreError::InvalidPattern {
        pattern: source.clone(),
        message: e.to_string(),
    })
}

/// Resolve the effective baseline version.
///
/// `Explicit` is returned unchanged, `Disabled` and `Unset` resolve to
/// nothing, and `Auto` scans `{location}/{prefix}*.sql` for versioned script
/// names and returns the highest version found. When two names carry equal
/// versions the later one in scan order wins.
pub fn resolve_baseline<S: ResourceSpace + ?Sized>(
    directive: &BaselineDirective,
    script_prefix: &str,
    platform: &str,
    script_location: &str,
    space: &S,
) -> CoreResult<Option<Version>> {
    match directive {
        BaselineDirective::Explicit(version) => Ok(Some(version.clone())),
        BaselineDirective::Disabled | BaselineDirective::Unset => Ok(None),
        BaselineDirective::Auto => {
            let matcher = versioned_script_regex(script_prefix, platform)?;
            let scan = LocationPattern::Wildcard(join_location(
                &Pattern::escape(script_location),
                &format!("{}*.sql", Pattern::escape(script_prefix)),
            ));

            let mut highest: Option<Version> = None;
            for script in locate(space, &[scan])? {
                let Some(captures) = matcher.captures(script.filename()) else {
                    continue;
                };
                let version = Version::parse(&captures[1])?;
                log::debug!("Versioned script {} -> {}", script, version);
                if highest.as_ref().map_or(true, |current| version >= *current) {
                    highest = Some(version);
                }
            }
            Ok(highest)
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
