//! Directory tree widget.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

use dirtree_core::{DirTree, NodeId};

use crate::theme::Theme;

const EXCLUDED_TAG: &str = " excluded ";

/// State for the tree view.
///
/// Expansion is keyed by path so it survives a rescan, which renumbers
/// every node.
#[derive(Debug, Default, Clone)]
pub struct TreeState {
    /// Cursor index in the flattened view.
    pub cursor: usize,
    /// Scroll offset.
    pub offset: usize,
    expanded: HashSet<PathBuf>,
}

impl TreeState {
    /// Fresh state for a newly opened tree, with every root expanded.
    pub fn for_tree(tree: &DirTree) -> Self {
        let expanded = tree
            .roots()
            .iter()
            .filter_map(|&id| tree.node(id))
            .map(|node| node.path().to_path_buf())
            .collect();
        Self {
            cursor: 0,
            offset: 0,
            expanded,
        }
    }

    pub fn expand(&mut self, path: &Path) {
        self.expanded.insert(path.to_path_buf());
    }

    pub fn collapse(&mut self, path: &Path) {
        self.expanded.remove(path);
    }

    pub fn is_expanded(&self, path: &Path) -> bool {
        self.expanded.contains(path)
    }

    /// Move the cursor up.
    pub fn move_up(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_sub(count);
    }

    /// Move the cursor down, staying within `len` items.
    pub fn move_down(&mut self, count: usize, len: usize) {
        self.cursor = (self.cursor + count).min(len.saturating_sub(1));
    }

    pub fn jump_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn jump_to_bottom(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Ensure the cursor row is visible, adjusting offset if needed.
    pub fn ensure_visible(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + viewport_height {
            self.offset = self.cursor - viewport_height + 1;
        }
    }
}

/// A row of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleItem {
    pub id: NodeId,
    pub depth: usize,
    pub expanded: bool,
    pub is_last_sibling: bool,
    pub parent_last_siblings: Vec<bool>,
}

/// Flatten `tree` into display rows following the expansion state.
pub fn visible_items(tree: &DirTree, state: &TreeState) -> Vec<VisibleItem> {
    let mut items = Vec::new();
    let roots = tree.roots();
    for (i, &root) in roots.iter().enumerate() {
        flatten_node(tree, root, 0, i + 1 == roots.len(), Vec::new(), state, &mut items);
    }
    items
}

fn flatten_node(
    tree: &DirTree,
    id: NodeId,
    depth: usize,
    is_last: bool,
    parent_last_siblings: Vec<bool>,
    state: &TreeState,
    items: &mut Vec<VisibleItem>,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let expanded = node.is_dir() && state.is_expanded(node.path());

    items.push(VisibleItem {
        id,
        depth,
        expanded,
        is_last_sibling: is_last,
        parent_last_siblings: parent_last_siblings.clone(),
    });

    if expanded {
        let children = tree.children(id);
        for (i, &child) in children.iter().enumerate() {
            let mut child_parent_lasts = parent_last_siblings.clone();
            if depth > 0 {
                child_parent_lasts.push(is_last);
            }
            flatten_node(
                tree,
                child,
                depth + 1,
                i + 1 == children.len(),
                child_parent_lasts,
                state,
                items,
            );
        }
    }
}

/// Tree view widget.
pub struct TreeView<'a> {
    tree: &'a DirTree,
    theme: &'a Theme,
    block: Option<Block<'a>>,
}

impl<'a> TreeView<'a> {
    /// Create a new tree view.
    pub fn new(tree: &'a DirTree, theme: &'a Theme) -> Self {
        Self {
            tree,
            theme,
            block: None,
        }
    }

    /// Set the block (border) for the widget.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn row_style(&self, id: NodeId, is_dir: bool) -> Style {
        if self.tree.is_excluded(id) {
            self.theme.excluded
        } else if self.tree.is_hidden_by_ancestor(id) {
            self.theme.hidden
        } else if is_dir {
            self.theme.directory
        } else {
            self.theme.file
        }
    }
}

impl StatefulWidget for TreeView<'_> {
    type State = TreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        let items = visible_items(self.tree, state);
        let viewport_height = inner_area.height as usize;
        state.clamp(items.len());
        state.ensure_visible(viewport_height);

        let start = state.offset;
        let end = (start + viewport_height).min(items.len());

        for (row_idx, item) in items[start..end].iter().enumerate() {
            let Some(node) = self.tree.node(item.id) else {
                continue;
            };
            let y = inner_area.y + row_idx as u16;
            let is_cursor = start + row_idx == state.cursor;
            let is_selected = self.tree.is_selected(item.id);
            let is_excluded = self.tree.is_excluded(item.id);

            let mut prefix = String::new();
            for &parent_is_last in &item.parent_last_siblings {
                prefix.push_str(if parent_is_last { "  " } else { "│ " });
            }
            if item.depth > 0 {
                prefix.push_str(if item.is_last_sibling { "└─" } else { "├─" });
            }

            let (marker, marker_style) = if is_selected {
                ("● ", self.theme.selected)
            } else {
                ("  ", Style::default().fg(self.theme.muted))
            };

            let expand_indicator = match (node.is_dir(), item.expanded) {
                (true, true) => "▼ ",
                (true, false) => "▶ ",
                _ => "  ",
            };

            let text = node.display_text();
            let mut spans = vec![
                Span::styled(prefix, self.theme.tree_lines),
                Span::styled(marker, marker_style),
                Span::styled(expand_indicator, Style::default().fg(self.theme.muted)),
                Span::styled(text, self.row_style(item.id, node.is_dir())),
            ];

            // Right-align a tag on explicitly excluded rows when it fits
            if is_excluded {
                let used: usize = spans.iter().map(|s| s.content.width()).sum();
                let free = (inner_area.width as usize).saturating_sub(used);
                if free > EXCLUDED_TAG.width() {
                    spans.push(Span::raw(" ".repeat(free - EXCLUDED_TAG.width())));
                    spans.push(Span::styled(
                        EXCLUDED_TAG,
                        Style::default()
                            .fg(self.theme.error)
                            .add_modifier(Modifier::BOLD),
                    ));
                }
            }

            let mut line = Line::from(spans);
            if is_cursor {
                line = line.style(self.theme.cursor);
            }

            let line_area = Rect::new(inner_area.x, y, inner_area.width, 1);
            Widget::render(line, line_area, buf);
        }
    }
}
