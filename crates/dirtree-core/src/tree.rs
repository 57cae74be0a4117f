//! Arena-backed directory tree with exclusion marks and selection.

use std::collections::HashSet;
use std::path::PathBuf;

use compact_str::CompactString;
use indexmap::IndexSet;

use crate::error::TreeError;
use crate::node::{NodeId, NodeKind, TreeNode};

/// Ordered forest of scanned entries.
///
/// Nodes live in a flat `Vec` indexed by [`NodeId`]. The excluded-set and the
/// selection only ever reference ids; neither mutates the structure.
#[derive(Debug, Clone, Default)]
pub struct DirTree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    excluded: HashSet<NodeId>,
    selection: IndexSet<NodeId>,
}

impl DirTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level node.
    pub fn add_root(
        &mut self,
        name: impl Into<CompactString>,
        kind: NodeKind,
        path: impl Into<PathBuf>,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes
            .push(TreeNode::new(id, name, kind, path.into(), None));
        self.roots.push(id);
        id
    }

    /// Append a child under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<CompactString>,
        kind: NodeKind,
        path: impl Into<PathBuf>,
    ) -> Result<NodeId, TreeError> {
        if parent.index() >= self.nodes.len() {
            return Err(TreeError::UnknownNode(parent));
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes
            .push(TreeNode::new(id, name, kind, path.into(), Some(parent)));
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Drop all nodes, marks and selection.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.excluded.clear();
        self.selection.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.index())
    }

    /// Children of a node, empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of ancestors above a node (0 for roots).
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).and_then(|n| n.parent);
        }
        depth
    }

    /// All node ids in depth-first pre-order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Mark nodes as excluded. Unknown ids are ignored.
    pub fn exclude(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        for id in ids {
            if id.index() < self.nodes.len() {
                self.excluded.insert(id);
            }
        }
    }

    /// Remove exclusion marks.
    pub fn include(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        for id in ids {
            self.excluded.remove(&id);
        }
    }

    /// Remove every exclusion mark, returning how many were set.
    pub fn clear_exclusions(&mut self) -> usize {
        let count = self.excluded.len();
        self.excluded.clear();
        count
    }

    pub fn is_excluded(&self, id: NodeId) -> bool {
        self.excluded.contains(&id)
    }

    /// Number of nodes carrying an exclusion mark.
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    /// Whether some strict ancestor of the node is excluded.
    ///
    /// Such nodes are omitted from export even though they are not marked.
    pub fn is_hidden_by_ancestor(&self, id: NodeId) -> bool {
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            if self.excluded.contains(&parent) {
                return true;
            }
            current = self.node(parent).and_then(|n| n.parent);
        }
        false
    }

    /// Add nodes to the selection, keeping selection order.
    pub fn select(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        for id in ids {
            if id.index() < self.nodes.len() {
                self.selection.insert(id);
            }
        }
    }

    /// Replace the selection.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.selection.clear();
        self.select(ids);
    }

    /// Toggle one node in or out of the selection.
    pub fn toggle_selected(&mut self, id: NodeId) {
        if !self.selection.shift_remove(&id) {
            self.select([id]);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains(&id)
    }

    /// Current multi-selection in the order it was made.
    pub fn selected(&self) -> Vec<NodeId> {
        self.selection.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DirTree, NodeId, NodeId, NodeId) {
        let mut tree = DirTree::new();
        let root = tree.add_root("proj", NodeKind::Directory, "/proj");
        let src = tree
            .add_child(root, "src", NodeKind::Directory, "/proj/src")
            .unwrap();
        let file = tree
            .add_child(src, "a.py", NodeKind::File, "/proj/src/a.py")
            .unwrap();
        (tree, root, src, file)
    }

    #[test]
    fn test_structure() {
        let (tree, root, src, file) = sample();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree.children(root), &[src]);
        assert_eq!(tree.children(src), &[file]);
        assert_eq!(tree.depth(file), 2);
        assert_eq!(tree.node(file).unwrap().parent, Some(src));
        assert_eq!(tree.preorder(), vec![root, src, file]);
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let mut tree = DirTree::new();
        let err = tree
            .add_child(NodeId(7), "x", NodeKind::File, "/x")
            .unwrap_err();
        assert_eq!(err, TreeError::UnknownNode(NodeId(7)));
    }

    #[test]
    fn test_exclude_is_idempotent_and_non_structural() {
        let (mut tree, _, src, file) = sample();
        tree.exclude([src, src]);
        assert_eq!(tree.excluded_count(), 1);
        assert!(tree.is_excluded(src));
        assert!(!tree.is_excluded(file));
        assert!(tree.is_hidden_by_ancestor(file));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.children(src), &[file]);

        tree.include([src]);
        tree.include([src]);
        assert_eq!(tree.excluded_count(), 0);
        assert!(!tree.is_hidden_by_ancestor(file));
    }

    #[test]
    fn test_exclude_ignores_unknown_ids() {
        let (mut tree, ..) = sample();
        tree.exclude([NodeId(99)]);
        assert_eq!(tree.excluded_count(), 0);
    }

    #[test]
    fn test_clear_exclusions() {
        let (mut tree, root, src, file) = sample();
        tree.exclude([root, src, file]);
        assert_eq!(tree.clear_exclusions(), 3);
        assert_eq!(tree.excluded_count(), 0);
    }

    #[test]
    fn test_selection_order_and_toggle() {
        let (mut tree, root, src, file) = sample();
        tree.select([file, root]);
        assert_eq!(tree.selected(), vec![file, root]);

        tree.toggle_selected(file);
        assert_eq!(tree.selected(), vec![root]);
        tree.toggle_selected(src);
        assert_eq!(tree.selected(), vec![root, src]);

        tree.set_selection([file]);
        assert_eq!(tree.selected(), vec![file]);
    }

    #[test]
    fn test_clear_drops_everything() {
        let (mut tree, root, src, _) = sample();
        tree.exclude([src]);
        tree.select([root]);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
        assert_eq!(tree.excluded_count(), 0);
        assert!(tree.selected().is_empty());
    }
}
