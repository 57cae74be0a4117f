//! Directory scanning for dirtree.
//!
//! # Overview
//!
//! `dirtree-scan` lists directories one level at a time and builds the
//! in-memory tree from those listings:
//!
//! - **[`DirectoryScanner`]** returns a directory's immediate children,
//!   directories first, dropping any entry whose name is in the active
//!   [`PatternSet`]
//! - **[`TreeBuilder`]** walks depth-first from a root, re-listing every
//!   discovered directory and appending the results to a [`DirTree`]
//!
//! A directory that cannot be read contributes a [`ScanWarning`] and no
//! children; the rest of the walk continues.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirtree_scan::{DirTree, PatternSet, ScanConfig, TreeBuilder};
//!
//! let config = ScanConfig::new("/path/to/project", PatternSet::builtin());
//! let mut tree = DirTree::new();
//! let summary = TreeBuilder::new(config).build_into(&mut tree).unwrap();
//!
//! println!("{} files, {} directories", summary.files, summary.dirs);
//! print!("{}", dirtree_core::render_export(&tree));
//! ```

mod builder;
mod scanner;
mod summary;

pub use builder::TreeBuilder;
pub use scanner::{DirEntry, DirectoryScanner};
pub use summary::ScanSummary;

// Re-export core types for convenience
pub use dirtree_core::{DirTree, NodeId, NodeKind, PatternSet, ScanConfig, ScanError, ScanWarning, WarningKind};
