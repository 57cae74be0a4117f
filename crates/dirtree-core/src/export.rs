//! Indented text export of the visible tree.

use std::path::Path;

use itertools::Itertools;

use crate::error::ExportError;
use crate::node::NodeId;
use crate::tree::DirTree;

/// Indentation emitted per depth level.
pub const EXPORT_INDENT: &str = "    ";

/// Render the tree as one line per visible node.
///
/// Traversal is depth-first pre-order over all roots. An excluded node is
/// skipped together with its entire subtree. Lines are joined with `\n` and
/// carry no trailing newline.
pub fn render_export(tree: &DirTree) -> String {
    let mut lines = Vec::with_capacity(tree.len());
    for &root in tree.roots() {
        collect_lines(tree, root, 0, &mut lines);
    }
    lines.into_iter().join("\n")
}

fn collect_lines(tree: &DirTree, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    if tree.is_excluded(id) {
        return;
    }
    let Some(node) = tree.node(id) else {
        return;
    };
    lines.push(format!("{}{}", EXPORT_INDENT.repeat(depth), node.name));
    for &child in &node.children {
        collect_lines(tree, child, depth + 1, lines);
    }
}

/// Render the tree and write it to `path` as UTF-8.
///
/// Returns the number of lines written.
pub fn write_export(tree: &DirTree, path: &Path) -> Result<usize, ExportError> {
    let text = render_export(tree);
    let line_count = if text.is_empty() { 0 } else { text.lines().count() };
    std::fs::write(path, text).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), lines = line_count, "exported tree structure");
    Ok(line_count)
}
