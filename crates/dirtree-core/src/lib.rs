//! Core types for dirtree.
//!
//! This crate provides the data structures shared by the scanner and the
//! terminal UI: the node arena backing the tree view, immutable pattern
//! snapshots, the JSON profile store and the indented text export.

mod config;
mod error;
pub mod export;
mod node;
mod patterns;
pub mod profile;
mod tree;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ExportError, ProfileError, ScanError, ScanWarning, TreeError, WarningKind};
pub use export::{EXPORT_INDENT, render_export, write_export};
pub use node::{DIR_ICON, FILE_ICON, NodeId, NodeKind, TreeNode, strip_icon};
pub use patterns::{BUILTIN_EXCLUDES, PatternSet};
pub use profile::{DEFAULT_PROFILE, ProfileStore};
pub use tree::DirTree;
