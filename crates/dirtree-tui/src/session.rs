//! Toolkit-independent state of one browsing session.
//!
//! A [`Session`] owns the scanned tree, the profile store and the active
//! pattern snapshot. Every user action maps to one method returning an
//! [`Outcome`] for the status line or a [`SessionError`] for a dialog.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use strum::Display;
use thiserror::Error;

use dirtree_core::profile::DEFAULT_PROFILE;
use dirtree_core::{
    DirTree, ExportError, NodeId, PatternSet, ProfileError, ProfileStore, ScanConfig, ScanError,
    write_export,
};
use dirtree_scan::{ScanSummary, TreeBuilder};

/// Errors surfaced to the user as a dialog.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An action needs a loaded directory.
    #[error("Select a directory first")]
    NoDirectory,

    /// Save-as target already exists.
    #[error("Profile \"{0}\" already exists")]
    DuplicateProfile(String),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Export(#[from] ExportError),

    /// The system opener failed.
    #[error("Could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Validation problems the user can fix, as opposed to I/O failures.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::NoDirectory
                | Self::DuplicateProfile(_)
                | Self::Profile(
                    ProfileError::ReadOnly { .. } | ProfileError::EmptyName | ProfileError::Unknown { .. }
                )
        )
    }
}

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Status line text.
    pub message: String,
    /// The tree was rebuilt, so node ids from before the call are stale.
    pub rescanned: bool,
}

impl Outcome {
    fn status(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rescanned: false,
        }
    }

    fn after_scan(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rescanned: true,
        }
    }
}

/// Whether a directory has been loaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    Idle,
    Loaded,
}

/// Result of removing patterns in the patterns dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedPatterns {
    pub removed: usize,
    pub protected: usize,
}

pub type SessionResult = Result<Outcome, SessionError>;

/// One browsing session: directory, tree, profiles and active patterns.
#[derive(Debug)]
pub struct Session {
    store: ProfileStore,
    active_profile: String,
    patterns: PatternSet,
    directory: Option<PathBuf>,
    tree: DirTree,
    last_scan: Option<ScanSummary>,
}

impl Session {
    /// Start a session with `profile` active, falling back to the default
    /// profile when the store does not know it.
    pub fn new(store: ProfileStore, profile: &str) -> Self {
        let active_profile = if store.contains(profile) {
            profile.to_string()
        } else {
            DEFAULT_PROFILE.to_string()
        };
        let patterns = PatternSet::builtin().union(&store.get(&active_profile));
        Self {
            store,
            active_profile,
            patterns,
            directory: None,
            tree: DirTree::new(),
            last_scan: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.directory.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Idle
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn tree(&self) -> &DirTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DirTree {
        &mut self.tree
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn active_profile(&self) -> &str {
        &self.active_profile
    }

    /// Active pattern snapshot (built-ins, profile and session additions).
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn last_scan(&self) -> Option<&ScanSummary> {
        self.last_scan.as_ref()
    }

    fn on_default_profile(&self) -> bool {
        self.active_profile == DEFAULT_PROFILE
    }

    /// Make `path` the current directory and scan it.
    ///
    /// The previous directory and tree stay in place if the scan fails.
    pub fn open_directory(&mut self, path: impl AsRef<Path>) -> SessionResult {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|e| ScanError::io(path, e))?;
        if !canonical.is_dir() {
            return Err(ScanError::NotADirectory { path: canonical }.into());
        }
        tracing::info!(path = %canonical.display(), "opening directory");
        let scan = Scan::run(&canonical, &self.patterns)?;
        self.directory = Some(canonical);
        Ok(self.commit_scan(scan))
    }

    /// Rebuild the tree from disk with the current pattern snapshot.
    pub fn rescan(&mut self) -> SessionResult {
        let directory = self.directory.as_deref().ok_or(SessionError::NoDirectory)?;
        let scan = Scan::run(directory, &self.patterns)?;
        Ok(self.commit_scan(scan))
    }

    fn commit_scan(&mut self, scan: Scan) -> Outcome {
        self.tree = scan.tree;
        self.last_scan = Some(scan.summary);
        Outcome::after_scan(scan.message)
    }

    /// Mark every selected node as excluded.
    pub fn exclude_selected(&mut self) -> SessionResult {
        let selected = self.tree.selected();
        if selected.is_empty() {
            return Ok(Outcome::status("No items selected to exclude"));
        }
        let count = selected.len();
        self.tree.exclude(selected);
        Ok(Outcome::status(format!("Excluded {count} item(s)")))
    }

    /// Remove the exclusion mark from every selected node.
    pub fn include_selected(&mut self) -> SessionResult {
        let selected = self.tree.selected();
        if selected.is_empty() {
            return Ok(Outcome::status("No items selected to include"));
        }
        let count = selected.len();
        self.tree.include(selected);
        Ok(Outcome::status(format!("Included {count} item(s) again")))
    }

    pub fn clear_exclusions(&mut self) -> SessionResult {
        match self.tree.clear_exclusions() {
            0 => Ok(Outcome::status("No excluded items")),
            count => Ok(Outcome::status(format!("Cleared all exclusions ({count} items)"))),
        }
    }

    /// Turn the names of the selected nodes into exclusion patterns.
    ///
    /// Every selected node is marked excluded, including those whose name
    /// was already a pattern. Outside the default profile new patterns are
    /// saved right away, and nothing changes if that save fails.
    pub fn add_selected_to_patterns(&mut self) -> SessionResult {
        let selected = self.tree.selected();
        if selected.is_empty() {
            return Ok(Outcome::status("No items selected"));
        }

        let mut patterns = self.patterns.clone();
        let mut added = 0;
        for &id in &selected {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            if !patterns.matches(&node.name) {
                patterns = patterns.with(node.name.as_str());
                added += 1;
            }
        }

        let saved = added > 0 && !self.on_default_profile();
        if saved {
            self.store
                .save(&self.active_profile, &patterns.user_patterns())?;
        }

        let marked = selected.len();
        self.patterns = patterns;
        self.tree.exclude(selected);

        let message = match added {
            0 => format!("Excluded {marked} item(s); names are already patterns"),
            _ if saved => format!("Added {added} exclusion pattern(s)"),
            _ => format!(
                "Added {added} exclusion pattern(s); not saved to the {DEFAULT_PROFILE} profile"
            ),
        };
        Ok(Outcome::status(message))
    }

    /// Activate a stored profile and rescan if a directory is loaded.
    ///
    /// The scan runs before anything is switched, so a failed scan keeps
    /// the previous profile and tree.
    pub fn switch_profile(&mut self, name: &str) -> SessionResult {
        if !self.store.contains(name) {
            return Err(ProfileError::Unknown {
                name: name.to_string(),
            }
            .into());
        }
        let patterns = PatternSet::builtin().union(&self.store.get(name));
        let scan = match &self.directory {
            Some(directory) => Some(Scan::run(directory, &patterns)?),
            None => None,
        };
        Ok(self.activate(name, patterns, scan))
    }

    fn activate(&mut self, name: &str, patterns: PatternSet, scan: Option<Scan>) -> Outcome {
        tracing::info!(profile = name, patterns = patterns.len(), "switched profile");
        self.active_profile = name.to_string();
        self.patterns = patterns;

        let loaded = format!("Loaded profile: {name}");
        match scan {
            Some(scan) => {
                let scanned = self.commit_scan(scan);
                Outcome::after_scan(format!("{loaded}. {}", scanned.message))
            }
            None => Outcome::status(loaded),
        }
    }

    /// Persist the active pattern set under the active profile.
    pub fn save_current_profile(&mut self) -> SessionResult {
        self.store
            .save(&self.active_profile, &self.patterns.user_patterns())?;
        Ok(Outcome::status(format!(
            "Profile {} saved",
            self.active_profile
        )))
    }

    /// Save the active pattern set as a new profile and switch to it.
    pub fn save_profile_as(&mut self, name: &str) -> SessionResult {
        let name = name.trim();
        if self.store.contains(name) && name != DEFAULT_PROFILE {
            return Err(SessionError::DuplicateProfile(name.to_string()));
        }
        self.store.save(name, &self.patterns.user_patterns())?;
        self.active_profile = name.to_string();
        Ok(Outcome::status(format!("Created profile: {name}")))
    }

    /// Delete the active profile and fall back to the default one.
    pub fn delete_active_profile(&mut self) -> SessionResult {
        let name = self.active_profile.clone();
        if self.on_default_profile() {
            return Err(ProfileError::ReadOnly { name }.into());
        }
        let patterns = PatternSet::builtin().union(&self.store.get(DEFAULT_PROFILE));
        let scan = match &self.directory {
            Some(directory) => Some(Scan::run(directory, &patterns)?),
            None => None,
        };
        self.store.delete(&name)?;
        let switched = self.activate(DEFAULT_PROFILE, patterns, scan);
        Ok(Outcome {
            message: format!("Deleted profile: {name}. {}", switched.message),
            rescanned: switched.rescanned,
        })
    }

    /// Add a pattern to the in-memory set. Takes effect on the next scan.
    pub fn add_pattern(&mut self, text: &str) -> SessionResult {
        let pattern = text.trim();
        if pattern.is_empty() {
            return Ok(Outcome::status("Enter a pattern"));
        }
        if self.patterns.matches(pattern) {
            return Ok(Outcome::status(format!("Pattern already active: {pattern}")));
        }
        self.patterns = self.patterns.with(pattern);
        Ok(Outcome::status(format!("Added pattern: {pattern}")))
    }

    /// Remove patterns from the in-memory set. Built-ins are kept.
    pub fn remove_patterns<S: AsRef<str>>(&mut self, names: &[S]) -> SessionResult {
        let mut result = RemovedPatterns::default();
        for name in names.iter().map(AsRef::as_ref) {
            if PatternSet::is_builtin(name) {
                result.protected += 1;
            } else if self.patterns.matches(name) {
                self.patterns = self.patterns.without(name);
                result.removed += 1;
            }
        }

        let mut message = format!("Removed {} pattern(s)", result.removed);
        if result.protected > 0 {
            message.push_str(&format!(", {} built-in kept", result.protected));
        }
        Ok(Outcome::status(message))
    }

    /// Write the non-excluded tree to `path`.
    pub fn export(&self, path: impl AsRef<Path>) -> SessionResult {
        if self.directory.is_none() {
            return Err(SessionError::NoDirectory);
        }
        let path = path.as_ref();
        write_export(&self.tree, path)?;
        Ok(Outcome::status(format!(
            "Structure saved to file: {}",
            path.display()
        )))
    }

    /// Suggested export file name for the current directory, stamped now.
    pub fn default_export_name(&self) -> Option<String> {
        self.directory
            .as_deref()
            .map(|dir| export_file_name(dir, Local::now()))
    }

    /// Open a directory node in the system file manager. Files are ignored.
    pub fn open_in_file_manager(&self, id: NodeId) -> SessionResult {
        let Some(node) = self.tree.node(id) else {
            return Ok(Outcome::status("No item under the cursor"));
        };
        if !node.is_dir() {
            return Ok(Outcome::status(format!("{} is not a directory", node.name)));
        }
        let path = node.path().to_path_buf();
        crate::opener::open_directory(&path).map_err(|source| SessionError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Outcome::status(format!("Opened directory: {}", path.display())))
    }
}

/// A finished scan not yet applied to the session.
struct Scan {
    tree: DirTree,
    summary: ScanSummary,
    message: String,
}

impl Scan {
    fn run(directory: &Path, patterns: &PatternSet) -> Result<Self, ScanError> {
        let mut tree = DirTree::new();
        let config = ScanConfig::new(directory, patterns.clone());
        let summary = TreeBuilder::new(config).build_into(&mut tree)?;

        let mut message = format!(
            "Loaded {}: {} directories, {} files",
            directory.display(),
            summary.dirs,
            summary.files
        );
        if summary.has_warnings() {
            message.push_str(&format!(" ({} unreadable)", summary.warnings.len()));
        }
        Ok(Self {
            tree,
            summary,
            message,
        })
    }
}

/// `structure_<dirname>_<YYYYmmdd_HHMMSS>.txt`
fn export_file_name(directory: &Path, at: DateTime<Local>) -> String {
    let base = directory
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("structure_{}_{}.txt", base, at.format("%Y%m%d_%H%M%S"))
}
