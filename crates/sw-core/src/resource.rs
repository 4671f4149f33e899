//! Resource spaces and the resource locator
//!
//! A [`ResourceSpace`] is the searchable set of places SQL scripts can live,
//! similar to a classpath. Location patterns come in two forms: an exact
//! location that resolves to at most one script, and a wildcard location
//! (glob syntax) that may expand to many. The locator ([`locate`]) expands a
//! list of patterns in order and keeps only references that exist.

use crate::error::{CoreError, CoreResult};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Glob options shared by every resource space: `*` never crosses a `/`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A location pattern to expand against a resource space
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationPattern {
    /// A literal location, resolving to at most one script
    Exact(String),
    /// A glob pattern, resolving to every matching script
    Wildcard(String),
}

impl LocationPattern {
    /// The location text of the pattern
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(s) | Self::Wildcard(s) => s,
        }
    }
}

impl fmt::Display for LocationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(s) => write!(f, "{}", s),
            Self::Wildcard(s) => write!(f, "{} (wildcard)", s),
        }
    }
}

/// One discoverable script in a resource space
///
/// `location` is the logical, `/`-separated location relative to the space's
/// root; `path` is where the content physically lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReference {
    location: String,
    path: PathBuf,
    exists: bool,
}

impl ScriptReference {
    /// Reference to a script that exists
    pub fn new(location: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            path: path.into(),
            exists: true,
        }
    }

    /// Reference to a location with no script behind it
    pub fn missing(location: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            path: path.into(),
            exists: false,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Final segment of the logical location
    pub fn filename(&self) -> &str {
        self.location
            .rsplit('/')
            .next()
            .unwrap_or(self.location.as_str())
    }
}

impl fmt::Display for ScriptReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location)
    }
}

/// A searchable space of SQL scripts
pub trait ResourceSpace {
    /// Expand a pattern into references, in a deterministic (lexical) order.
    ///
    /// An exact pattern may return a reference whose `exists()` is false.
    /// Errors of kind [`io::ErrorKind::InvalidInput`] mean the pattern itself
    /// is malformed.
    fn expand(&self, pattern: &LocationPattern) -> io::Result<Vec<ScriptReference>>;

    /// Read the raw bytes of a script
    fn read(&self, script: &ScriptReference) -> io::Result<Vec<u8>>;
}

impl<T: ResourceSpace + ?Sized> ResourceSpace for &T {
    fn expand(&self, pattern: &LocationPattern) -> io::Result<Vec<ScriptReference>> {
        (**self).expand(pattern)
    }

    fn read(&self, script: &ScriptReference) -> io::Result<Vec<u8>> {
        (**self).read(script)
    }
}

impl<T: ResourceSpace + ?Sized> ResourceSpace for Arc<T> {
    fn expand(&self, pattern: &LocationPattern) -> io::Result<Vec<ScriptReference>> {
        (**self).expand(pattern)
    }

    fn read(&self, script: &ScriptReference) -> io::Result<Vec<u8>> {
        (**self).read(script)
    }
}

/// Expand `patterns` in order and keep the references that exist.
///
/// Results keep pattern order first, then each pattern's own match order.
/// A reference matched by two different patterns appears twice.
pub fn locate<S: ResourceSpace + ?Sized>(
    space: &S,
    patterns: &[LocationPattern],
) -> CoreResult<Vec<ScriptReference>> {
    let mut found = Vec::new();
    for pattern in patterns {
        let refs = space.expand(pattern).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidInput {
                CoreError::InvalidPattern {
                    pattern: pattern.as_str().to_string(),
                    message: e.to_string(),
                }
            } else {
                CoreError::ResourceAccess {
                    location: pattern.to_string(),
                    source: e,
                }
            }
        })?;
        let before = found.len();
        found.extend(refs.into_iter().filter(ScriptReference::exists));
        log::debug!("{} -> {} script(s)", pattern, found.len() - before);
    }
    Ok(found)
}

/// Join a directory-like location and a file name with `/`.
pub fn join_location(location: &str, file: &str) -> String {
    let location = location.trim_end_matches('/');
    if location.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", location, file)
    }
}

fn invalid_pattern(err: impl fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
}

/// Whether `path` is a regular file. Only `NotFound` counts as absent; any
/// other metadata failure (e.g. permission denied) is returned.
fn is_existing_file(path: &Path) -> io::Result<bool> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Resource space over one or more directories on disk
///
/// Roots are searched in order, like the entries of a classpath. Exact
/// patterns resolve to the first root that contains the file; wildcard
/// patterns collect matches from every root.
#[derive(Debug, Clone)]
pub struct FileSystemResourceSpace {
    roots: Vec<PathBuf>,
}

impl FileSystemResourceSpace {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// `/`-separated location of `path` relative to `root`
    fn logical_location(root: &Path, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(root).ok()?;
        let segments: Option<Vec<&str>> = relative.iter().map(|s| s.to_str()).collect();
        Some(segments?.join("/"))
    }
}

impl ResourceSpace for FileSystemResourceSpace {
    fn expand(&self, pattern: &LocationPattern) -> io::Result<Vec<ScriptReference>> {
        match pattern {
            LocationPattern::Exact(location) => {
                for root in &self.roots {
                    let path = root.join(location);
                    if is_existing_file(&path)? {
                        return Ok(vec![ScriptReference::new(location.as_str(), path)]);
                    }
                }
                Ok(self
                    .roots
                    .first()
                    .map(|root| ScriptReference::missing(location.as_str(), root.join(location)))
                    .into_iter()
                    .collect())
            }
            LocationPattern::Wildcard(glob_text) => {
                // Pattern problems are reported even when no root exists
                Pattern::new(glob_text).map_err(invalid_pattern)?;

                let mut matches: BTreeMap<(String, usize), PathBuf> = BTreeMap::new();
                for (index, root) in self.roots.iter().enumerate() {
                    let root_text = root.to_str().ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("resource root is not valid UTF-8: {}", root.display()),
                        )
                    })?;
                    let full = format!(
                        "{}/{}",
                        Pattern::escape(root_text.trim_end_matches('/')),
                        glob_text
                    );
                    for entry in glob::glob_with(&full, MATCH_OPTIONS).map_err(invalid_pattern)? {
                        let path = entry.map_err(glob::GlobError::into_error)?;
                        if !is_existing_file(&path)? {
                            continue;
                        }
                        if let Some(location) = Self::logical_location(root, &path) {
                            matches.insert((location, index), path);
                        }
                    }
                }
                Ok(matches
                    .into_iter()
                    .map(|((location, _), path)| ScriptReference::new(location, path))
                    .collect())
            }
        }
    }

    fn read(&self, script: &ScriptReference) -> io::Result<Vec<u8>> {
        std::fs::read(script.path())
    }
}

/// In-memory resource space keyed by logical location
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceSpace {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryResourceSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_file(mut self, location: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(location, content);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(location.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ResourceSpace for MemoryResourceSpace {
    fn expand(&self, pattern: &LocationPattern) -> io::Result<Vec<ScriptReference>> {
        match pattern {
            LocationPattern::Exact(location) => {
                let reference = if self.files.contains_key(location) {
                    ScriptReference::new(location.as_str(), location.as_str())
                } else {
                    ScriptReference::missing(location.as_str(), location.as_str())
                };
                Ok(vec![reference])
            }
            LocationPattern::Wildcard(glob_text) => {
                let compiled = Pattern::new(glob_text).map_err(invalid_pattern)?;
                Ok(self
                    .files
                    .keys()
                    .filter(|location| compiled.matches_with(location, MATCH_OPTIONS))
                    .map(|location| ScriptReference::new(location.as_str(), location.as_str()))
                    .collect())
            }
        }
    }

    fn read(&self, script: &ScriptReference) -> io::Result<Vec<u8>> {
        self.files.get(script.location()).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such resource: {}", script.location()),
            )
        })
    }
}

#[cfg(test)]
#[path = "resource_test.rs"]
mod tests;
