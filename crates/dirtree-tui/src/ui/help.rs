//! Help overlay widget.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Widget};

use crate::event::{HelpSection, get_command_help, get_help_sections};
use crate::theme::Theme;

/// Sections shown in the left column; the rest go right.
const LEFT_SECTIONS: &[&str] = &["Navigation", "Selection & Exclusion", "Directory & Export"];

/// Help overlay showing key bindings organized by section.
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    /// Create a new help overlay.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn section_title(&self, title: &'a str) -> Line<'a> {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(self.theme.info)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn binding_line(&self, keys: &str, description: &str, key_width: usize) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{keys:>key_width$}"), self.theme.help_key),
            Span::styled(format!(" {description}"), self.theme.help_desc),
        ])
    }

    /// Render lines top-down, stopping at the bottom of `area`.
    fn render_lines(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
        for (y, line) in (area.y..area.y + area.height).zip(lines.iter()) {
            buf.set_line(area.x, y, line, area.width);
        }
    }

    fn section_lines(&self, sections: &[&HelpSection]) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for section in sections {
            lines.push(self.section_title(section.title));
            for binding in &section.bindings {
                lines.push(self.binding_line(binding.keys, binding.description, 12));
            }
            lines.push(Line::raw(""));
        }
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_width = 84.min(area.width.saturating_sub(4));
        let popup_height = 36.min(area.height.saturating_sub(2));

        let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Help - Press ? or Esc to close ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let [left_col, right_col] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);

        let sections = get_help_sections();
        let (left, right): (Vec<&HelpSection>, Vec<&HelpSection>) = sections
            .iter()
            .partition(|s| LEFT_SECTIONS.contains(&s.title));

        Self::render_lines(self.section_lines(&left), left_col, buf);

        let mut right_lines = self.section_lines(&right);
        right_lines.push(self.section_title("Command Palette (:)"));
        for (cmd, desc) in get_command_help() {
            right_lines.push(self.binding_line(cmd, desc, 18));
        }
        Self::render_lines(right_lines, right_col, buf);
    }
}
