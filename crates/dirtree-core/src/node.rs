//! Tree node types.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Icon prefix shown before directory names.
pub const DIR_ICON: &str = "🗀 ";

/// Icon prefix shown before file names.
pub const FILE_ICON: &str = "📄 ";

/// Arena index of a node within a [`DirTree`](crate::DirTree).
///
/// Ids are assigned in insertion order and stay valid until the tree is
/// cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId from an arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Type of file system entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a file.
    pub fn is_file(self) -> bool {
        matches!(self, NodeKind::File)
    }

    /// Icon prefix used in display text.
    pub fn icon(self) -> &'static str {
        match self {
            NodeKind::Directory => DIR_ICON,
            NodeKind::File => FILE_ICON,
        }
    }
}

/// A single file or directory in the tree arena.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Identifier of this node.
    pub id: NodeId,
    /// Entry name (not full path, no icon).
    pub name: CompactString,
    /// Directory or file.
    pub kind: NodeKind,
    /// Parent node, `None` for roots.
    pub parent: Option<NodeId>,
    /// Children in scan order.
    pub children: Vec<NodeId>,
    path: PathBuf,
}

impl TreeNode {
    pub(crate) fn new(
        id: NodeId,
        name: impl Into<CompactString>,
        kind: NodeKind,
        path: PathBuf,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parent,
            children: Vec::new(),
            path,
        }
    }

    /// Absolute filesystem path. Fixed at creation.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Display text: icon glyph followed by the name.
    pub fn display_text(&self) -> String {
        format!("{}{}", self.kind.icon(), self.name)
    }
}

/// Strip a leading directory or file icon from display text.
///
/// Text without an icon is returned unchanged.
pub fn strip_icon(text: &str) -> &str {
    text.strip_prefix(DIR_ICON)
        .or_else(|| text.strip_prefix(FILE_ICON))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id, NodeId(42));
    }

    #[test]
    fn test_display_text_round_trip() {
        let dir = TreeNode::new(NodeId(0), "src", NodeKind::Directory, "/p/src".into(), None);
        let file = TreeNode::new(NodeId(1), "a.py", NodeKind::File, "/p/a.py".into(), None);

        assert_eq!(dir.display_text(), "🗀 src");
        assert_eq!(file.display_text(), "📄 a.py");
        assert_eq!(strip_icon(&dir.display_text()), "src");
        assert_eq!(strip_icon(&file.display_text()), "a.py");
    }

    #[test]
    fn test_strip_icon_plain_text() {
        assert_eq!(strip_icon("README.md"), "README.md");
        assert_eq!(strip_icon(""), "");
    }
}
