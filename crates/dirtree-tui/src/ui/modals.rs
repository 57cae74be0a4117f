//! Modal dialog widgets.

use std::collections::BTreeSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use dirtree_core::PatternSet;

use crate::app::input::InputState;
use crate::app::state::{ListCursor, MessageDialog};
use crate::theme::Theme;

/// Centered popup of at most `width` x `height`, cleared and framed.
fn popup(area: Rect, width: u16, height: u16, block: Block<'_>, buf: &mut Buffer) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    Clear.render(popup_area, buf);
    let inner = block.inner(popup_area);
    block.render(popup_area, buf);
    inner
}

fn key_hints(theme: &Theme, hints: &[(&str, &str)]) -> Line<'static> {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|&(key, desc)| {
            [
                Span::styled(format!(" {key} "), theme.help_key),
                Span::raw(format!("{desc}  ")),
            ]
        })
        .collect();
    Line::from(spans)
}

/// Command palette input widget.
pub struct CommandPalette<'a> {
    theme: &'a Theme,
    input: &'a str,
    cursor: usize,
}

impl<'a> CommandPalette<'a> {
    /// Create a new command palette widget. `cursor` counts characters.
    pub fn new(theme: &'a Theme, input: &'a str, cursor: usize) -> Self {
        Self {
            theme,
            input,
            cursor,
        }
    }
}

impl Widget for CommandPalette<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let mut spans = vec![Span::styled(":", self.theme.command_prompt)];

        if self.input.is_empty() {
            spans.push(Span::styled(
                "type command (open, export, profile, help...)",
                Style::default().fg(self.theme.muted),
            ));
        } else {
            let before: String = self.input.chars().take(self.cursor).collect();
            let at: String = self.input.chars().skip(self.cursor).take(1).collect();
            let after: String = self.input.chars().skip(self.cursor + 1).collect();
            spans.push(Span::raw(before));
            spans.push(Span::styled(
                if at.is_empty() { " ".to_string() } else { at },
                Style::default().add_modifier(Modifier::REVERSED),
            ));
            spans.push(Span::raw(after));
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.footer)
            .render(area, buf);
    }
}

/// Text input modal for paths, file names, profile names and patterns.
pub struct InputModal<'a> {
    theme: &'a Theme,
    input: &'a InputState,
    title: &'a str,
    prompt: &'a str,
}

impl<'a> InputModal<'a> {
    /// Create a new input modal.
    pub fn new(theme: &'a Theme, input: &'a InputState, title: &'a str, prompt: &'a str) -> Self {
        Self {
            theme,
            input,
            title,
            prompt,
        }
    }
}

impl Widget for InputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = if self.input.error().is_some() { 9 } else { 7 };
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = popup(area, 64, height, block, buf);

        let mut lines = vec![
            Line::styled(self.prompt, self.theme.help_desc),
            Line::raw(""),
        ];

        // Scroll horizontally so the cursor stays in view
        let cursor = self.input.cursor();
        let max_visible = (inner.width as usize).saturating_sub(4).max(1);
        let visible_start = cursor.saturating_sub(max_visible - 1);
        let cursor_in_view = cursor - visible_start;
        let visible: Vec<char> = self
            .input
            .buffer()
            .chars()
            .skip(visible_start)
            .take(max_visible)
            .collect();

        let before: String = visible.iter().take(cursor_in_view).collect();
        let at: String = visible
            .get(cursor_in_view)
            .map_or_else(|| " ".to_string(), char::to_string);
        let after: String = visible.iter().skip(cursor_in_view + 1).collect();
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::raw(before),
            Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ]));

        if let Some(error) = self.input.error() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(self.theme.error),
            ));
        }

        lines.push(Line::raw(""));
        lines.push(key_hints(self.theme, &[("Enter", "Confirm"), ("Esc", "Cancel")]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Yes/no confirmation dialog.
pub struct ConfirmModal<'a> {
    theme: &'a Theme,
    title: &'a str,
    question: String,
}

impl<'a> ConfirmModal<'a> {
    pub fn new(theme: &'a Theme, title: &'a str, question: impl Into<String>) -> Self {
        Self {
            theme,
            title,
            question: question.into(),
        }
    }
}

impl Widget for ConfirmModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.warning));
        let inner = popup(area, 56, 7, block, buf);

        let lines = vec![
            Line::styled(
                self.question,
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            key_hints(self.theme, &[("y/Enter", "Confirm"), ("n/Esc", "Cancel")]),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Warning or error dialog, dismissed by any key.
pub struct MessageModal<'a> {
    theme: &'a Theme,
    message: &'a MessageDialog,
}

impl<'a> MessageModal<'a> {
    pub fn new(theme: &'a Theme, message: &'a MessageDialog) -> Self {
        Self { theme, message }
    }
}

impl Widget for MessageModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = if self.message.is_error {
            self.theme.error
        } else {
            self.theme.warning
        };
        let block = Block::default()
            .title(format!(" {} ", self.message.title))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        // Rough line estimate for wrapped text
        let text_rows = (self.message.text.chars().count() / 50 + 1) as u16;
        let inner = popup(area, 60, text_rows + 5, block, buf);

        let lines = vec![
            Line::raw(self.message.text.as_str()),
            Line::raw(""),
            key_hints(self.theme, &[("any key", "Close")]),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Profile picker list.
pub struct ProfilePicker<'a> {
    theme: &'a Theme,
    list: &'a ListCursor,
    active: &'a str,
}

impl<'a> ProfilePicker<'a> {
    pub fn new(theme: &'a Theme, list: &'a ListCursor, active: &'a str) -> Self {
        Self {
            theme,
            list,
            active,
        }
    }
}

impl Widget for ProfilePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Profiles ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = popup(area, 40, self.list.items.len() as u16 + 4, block, buf);

        let mut lines: Vec<Line> = self
            .list
            .items
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let marker = if name == self.active { "● " } else { "  " };
                let line = Line::from(vec![
                    Span::styled(marker, self.theme.selected),
                    Span::raw(name.as_str()),
                ]);
                if i == self.list.selected {
                    line.style(self.theme.cursor)
                } else {
                    line
                }
            })
            .collect();
        lines.push(Line::raw(""));
        lines.push(key_hints(self.theme, &[("Enter", "Switch"), ("Esc", "Close")]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Active pattern list with built-ins shown as locked.
pub struct PatternsModal<'a> {
    theme: &'a Theme,
    list: &'a ListCursor,
    marked: &'a BTreeSet<String>,
}

impl<'a> PatternsModal<'a> {
    pub fn new(theme: &'a Theme, list: &'a ListCursor, marked: &'a BTreeSet<String>) -> Self {
        Self {
            theme,
            list,
            marked,
        }
    }
}

impl Widget for PatternsModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Exclusion Patterns ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = popup(area, 50, 24, block, buf);

        // Two rows for hints, one spacer
        let list_rows = (inner.height as usize).saturating_sub(3).max(1);
        let offset = self.list.selected.saturating_sub(list_rows - 1);

        let mut lines: Vec<Line> = self
            .list
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(list_rows)
            .map(|(i, pattern)| {
                let locked = PatternSet::is_builtin(pattern);
                let marker = if self.marked.contains(pattern) { "● " } else { "  " };
                let mut spans = vec![
                    Span::styled(marker, self.theme.selected),
                    Span::styled(
                        pattern.as_str(),
                        if locked {
                            Style::default().fg(self.theme.muted)
                        } else {
                            Style::default()
                        },
                    ),
                ];
                if locked {
                    spans.push(Span::styled(" (built-in)", Style::default().fg(self.theme.muted)));
                }
                let line = Line::from(spans);
                if i == self.list.selected {
                    line.style(self.theme.cursor)
                } else {
                    line
                }
            })
            .collect();

        if self.list.items.is_empty() {
            lines.push(Line::styled("  no patterns", Style::default().fg(self.theme.muted)));
        }

        while lines.len() < list_rows + 1 {
            lines.push(Line::raw(""));
        }
        lines.push(key_hints(self.theme, &[("a", "Add"), ("Space", "Mark"), ("d/Del", "Remove")]));
        lines.push(key_hints(self.theme, &[("w", "Save profile"), ("Esc", "Close")]));

        Paragraph::new(lines).render(inner, buf);
    }
}
