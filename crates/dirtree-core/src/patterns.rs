//! Exclusion pattern snapshots.

use std::collections::BTreeSet;
use std::sync::Arc;

/// Names excluded from every scan regardless of the active profile.
pub const BUILTIN_EXCLUDES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    ".idea",
    ".vscode",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    "node_modules",
    ".venv",
    "venv",
    ".DS_Store",
    "Thumbs.db",
];

/// Immutable, cheaply clonable set of literal entry names.
///
/// Patterns match an entry's base name by exact string equality. Mutating
/// operations return a new snapshot and leave the original untouched, so a
/// snapshot handed to a scan never changes underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    names: Arc<BTreeSet<String>>,
}

impl PatternSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in exclusion set.
    pub fn builtin() -> Self {
        BUILTIN_EXCLUDES.iter().copied().collect()
    }

    /// Whether `name` is one of the built-in patterns.
    pub fn is_builtin(name: &str) -> bool {
        BUILTIN_EXCLUDES.contains(&name)
    }

    /// Check if an entry name is excluded.
    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate patterns in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Return a snapshot that also contains `name`.
    pub fn with(&self, name: impl Into<String>) -> Self {
        let mut names = (*self.names).clone();
        names.insert(name.into());
        Self {
            names: Arc::new(names),
        }
    }

    /// Return a snapshot without `name`.
    pub fn without(&self, name: &str) -> Self {
        let mut names = (*self.names).clone();
        names.remove(name);
        Self {
            names: Arc::new(names),
        }
    }

    /// Return the union of both sets.
    pub fn union(&self, other: &PatternSet) -> Self {
        self.iter().chain(other.iter()).collect()
    }

    /// Patterns that are not built-in, i.e. the part a profile stores.
    pub fn user_patterns(&self) -> Self {
        self.iter().filter(|name| !Self::is_builtin(name)).collect()
    }

    /// Patterns as owned strings, sorted.
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PatternSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: Arc::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}
