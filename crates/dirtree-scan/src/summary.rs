//! Scan result summary.

use std::time::Duration;

use dirtree_core::{NodeId, ScanWarning};

/// Outcome of building a tree from disk.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Root node added to the tree.
    pub root: Option<NodeId>,
    /// Directories added (excluding the root).
    pub dirs: u64,
    /// Files added.
    pub files: u64,
    /// Directories that could not be read.
    pub warnings: Vec<ScanWarning>,
    /// Time spent scanning.
    pub elapsed: Duration,
}

impl ScanSummary {
    /// Total entries added below the root.
    pub fn total_items(&self) -> u64 {
        self.files + self.dirs
    }

    /// Check if any directory failed to read.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
