//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

use dirtree_core::profile::DEFAULT_PROFILE;

use crate::session::{Session, SessionState};
use crate::theme::Theme;
use crate::ui::modals::{
    CommandPalette, ConfirmModal, InputModal, MessageModal, PatternsModal, ProfilePicker,
};
use crate::ui::{AppLayout, HelpOverlay, TreeState, TreeView};

use super::input::InputState;
use super::state::{AppMode, ListCursor, MessageDialog, PatternsState};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub theme: &'a Theme,
    pub session: &'a Session,
    pub tree_state: &'a TreeState,
    pub status: &'a str,
    pub command_input: &'a str,
    pub command_cursor: usize,
    pub input_state: Option<&'a InputState>,
    pub message: Option<&'a MessageDialog>,
    pub profile_picker: &'a ListCursor,
    pub patterns: &'a PatternsState,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area);

    render_header(ctx, layout.header, buf);
    render_tree(ctx, layout.main, buf);
    render_status(ctx, layout.status, buf);
    render_footer(ctx, layout.footer, buf);

    match ctx.mode {
        AppMode::Help => HelpOverlay::new(ctx.theme).render(area, buf),
        AppMode::Command => {
            CommandPalette::new(ctx.theme, ctx.command_input, ctx.command_cursor)
                .render(layout.footer, buf);
        }
        mode if mode.is_text_input() => {
            if let Some(input) = ctx.input_state {
                let (title, prompt) = input_labels(mode);
                InputModal::new(ctx.theme, input, title, prompt).render(area, buf);
            }
        }
        AppMode::ConfirmDeleteProfile => {
            ConfirmModal::new(
                ctx.theme,
                "Confirm",
                format!("Delete profile {}?", ctx.session.active_profile()),
            )
            .render(area, buf);
        }
        AppMode::ProfilePicker => {
            ProfilePicker::new(ctx.theme, ctx.profile_picker, ctx.session.active_profile())
                .render(area, buf);
        }
        AppMode::Patterns => {
            PatternsModal::new(ctx.theme, &ctx.patterns.list, &ctx.patterns.marked)
                .render(area, buf);
        }
        AppMode::Message => {
            if let Some(message) = ctx.message {
                MessageModal::new(ctx.theme, message).render(area, buf);
            }
        }
        _ => {}
    }
}

fn input_labels(mode: AppMode) -> (&'static str, &'static str) {
    match mode {
        AppMode::OpeningDirectory => ("Open Directory", "Directory to scan:"),
        AppMode::Exporting => ("Export Structure", "Save structure to file:"),
        AppMode::SavingProfileAs => ("Save Profile As", "Profile name:"),
        AppMode::AddingPattern => ("Add Pattern", "Name to exclude:"),
        _ => ("Input", ""),
    }
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" dirtree ", ctx.theme.title.add_modifier(Modifier::BOLD));

    let directory = match ctx.session.directory() {
        Some(dir) => Span::styled(format!(" {} ", dir.display()), ctx.theme.header),
        None => Span::styled(
            " No directory selected ",
            ctx.theme.header.fg(ctx.theme.muted),
        ),
    };

    let profile = ctx.session.active_profile();
    let profile_style = if profile == DEFAULT_PROFILE {
        ctx.theme.header
    } else {
        ctx.theme.header.fg(ctx.theme.info)
    };
    let right = Line::from(vec![
        Span::styled(format!(" Profile: {profile} "), profile_style),
        Span::styled(
            format!(" {} ", ctx.session.state()),
            ctx.theme.header.fg(ctx.theme.muted),
        ),
    ]);

    Paragraph::new(Line::from(vec![title, directory]))
        .style(ctx.theme.header)
        .render(area, buf);
    Paragraph::new(right)
        .alignment(Alignment::Right)
        .render(area, buf);
}

fn render_tree(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ctx.theme.border)
        .title(" Structure ")
        .title_style(ctx.theme.title);

    if ctx.session.state() == SessionState::Idle {
        let inner = block.inner(area);
        block.render(area, buf);
        let hint = Line::from(vec![
            Span::raw("Press "),
            Span::styled(" o ", ctx.theme.help_key),
            Span::raw("to open a directory"),
        ]);
        let y = inner.y + inner.height / 2;
        if inner.height > 0 {
            Paragraph::new(hint)
                .alignment(Alignment::Center)
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
        return;
    }

    let mut tree_state = ctx.tree_state.clone();
    TreeView::new(ctx.session.tree(), ctx.theme)
        .block(block)
        .render(area, buf, &mut tree_state);
}

fn render_status(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let excluded = format!(
        " Excluded: {} ",
        ctx.session.tree().excluded_count()
    );
    let width = area.width as usize;
    let status_width = width.saturating_sub(excluded.width());

    let mut status = format!(" {}", ctx.status);
    if status.width() > status_width {
        // Keep the tail; recent detail is at the end of long messages
        while status.width() > status_width.saturating_sub(1) && !status.is_empty() {
            status.remove(0);
        }
        status.insert(0, '…');
    }

    let padding = " ".repeat(status_width.saturating_sub(status.width()));
    let line = Line::from(vec![
        Span::raw(status),
        Span::raw(padding),
        Span::styled(
            excluded,
            Style::default()
                .fg(ctx.theme.error)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    Paragraph::new(line)
        .style(ctx.theme.footer)
        .render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let keys: &[(&str, &str)] = match ctx.session.state() {
        SessionState::Idle => &[("o", "Open"), ("p", "Profile"), ("P", "Patterns")],
        SessionState::Loaded => &[
            ("Spc", "Select"),
            ("x", "Exclude"),
            ("u", "Include"),
            ("a", "+Pattern"),
            ("s", "Export"),
            ("p", "Profile"),
        ],
    };

    let spans: Vec<Span> = keys
        .iter()
        .chain([("?", "Help"), ("q", "Quit")].iter())
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!(" {key} "), ctx.theme.help_key),
                Span::styled(format!("{desc} "), ctx.theme.help_desc),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.footer)
        .render(area, buf);
}
