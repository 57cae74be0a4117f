//! Depth-first tree construction on top of [`DirectoryScanner`].

use std::path::Path;
use std::time::Instant;

use dirtree_core::{DirTree, NodeId, NodeKind, ScanConfig, ScanError};

use crate::scanner::DirectoryScanner;
use crate::summary::ScanSummary;

/// Populates a [`DirTree`] by listing every discovered directory in turn.
pub struct TreeBuilder {
    config: ScanConfig,
    scanner: DirectoryScanner,
}

impl TreeBuilder {
    /// Create a builder for the given configuration.
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            scanner: DirectoryScanner::new(),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Add the configured root and everything below it to `tree`.
    ///
    /// Only a root that is not a directory is an error. Unreadable
    /// subdirectories become warnings in the returned summary and stay in
    /// the tree without children.
    pub fn build_into(&self, tree: &mut DirTree) -> Result<ScanSummary, ScanError> {
        let start = Instant::now();
        let root_path = self.config.root.as_path();
        if !root_path.is_dir() {
            return Err(if root_path.exists() {
                ScanError::NotADirectory {
                    path: root_path.to_path_buf(),
                }
            } else {
                ScanError::NotFound {
                    path: root_path.to_path_buf(),
                }
            });
        }

        let root = tree.add_root(root_name(root_path), NodeKind::Directory, root_path);
        let mut summary = ScanSummary {
            root: Some(root),
            ..Default::default()
        };

        tracing::debug!(root = %root_path.display(), patterns = self.config.patterns.len(), "scan started");
        self.build_children(tree, root, root_path, 0, &mut summary);
        summary.elapsed = start.elapsed();
        tracing::info!(
            root = %root_path.display(),
            dirs = summary.dirs,
            files = summary.files,
            warnings = summary.warnings.len(),
            "scan finished in {:.2?}",
            summary.elapsed
        );
        Ok(summary)
    }

    fn build_children(
        &self,
        tree: &mut DirTree,
        parent: NodeId,
        path: &Path,
        depth: u32,
        summary: &mut ScanSummary,
    ) {
        if !self.config.allows_depth(depth) {
            return;
        }
        let entries = self
            .scanner
            .list_or_warn(path, &self.config.patterns, &mut summary.warnings);

        for entry in entries {
            let Ok(child) = tree.add_child(parent, entry.name.clone(), entry.kind, entry.path.clone())
            else {
                continue;
            };
            if entry.is_dir() {
                summary.dirs += 1;
                if !entry.is_symlink || self.config.descend_symlinks {
                    self.build_children(tree, child, &entry.path, depth + 1, summary);
                }
            } else {
                summary.files += 1;
            }
        }
    }
}

/// Display name for a scan root: its base name, or the full path for `/`.
fn root_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
