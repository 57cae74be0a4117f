//! UI components and widgets.

mod help;
pub mod modals;
mod tree;

pub use help::HelpOverlay;
pub use tree::{TreeState, TreeView, VisibleItem, visible_items};

use ratatui::layout::{Constraint, Layout, Rect};

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect) -> Self {
        let [header, main, status, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            header,
            main,
            status,
            footer,
        }
    }

    /// Rows available for tree items inside the bordered main area.
    pub fn tree_viewport(&self) -> usize {
        self.main.height.saturating_sub(2) as usize
    }
}
