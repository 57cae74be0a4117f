//! Color theme for the TUI.
//!
//! Both variants are derived from a small [`Palette`] so every widget style
//! is defined once, in [`Theme::from_palette`].

use ratatui::style::{Color, Modifier, Style};

/// Theme variant (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Raw colors a theme variant is built from.
#[derive(Debug, Clone, Copy)]
struct Palette {
    /// Screen background.
    base: Color,
    /// Header and footer background.
    surface: Color,
    /// Cursor row background.
    raised: Color,
    text: Color,
    strong_text: Color,
    subtle_text: Color,
    faint: Color,
    accent: Color,
    directory: Color,
    good: Color,
    caution: Color,
    bad: Color,
    mark: Color,
}

impl Palette {
    /// Zinc grays with teal accents.
    const DARK: Self = Self {
        base: Color::Rgb(24, 24, 27),
        surface: Color::Rgb(39, 39, 42),
        raised: Color::Rgb(63, 63, 70),
        text: Color::Rgb(212, 212, 216),
        strong_text: Color::Rgb(250, 250, 250),
        subtle_text: Color::Rgb(161, 161, 170),
        faint: Color::Rgb(82, 82, 91),
        accent: Color::Rgb(45, 212, 191),
        directory: Color::Rgb(96, 165, 250),
        good: Color::Rgb(74, 222, 128),
        caution: Color::Rgb(251, 191, 36),
        bad: Color::Rgb(248, 113, 113),
        mark: Color::Rgb(250, 204, 21),
    };

    /// The same hues, darkened for contrast on a pale background.
    const LIGHT: Self = Self {
        base: Color::Rgb(250, 250, 250),
        surface: Color::Rgb(228, 228, 231),
        raised: Color::Rgb(212, 212, 216),
        text: Color::Rgb(39, 39, 42),
        strong_text: Color::Rgb(9, 9, 11),
        subtle_text: Color::Rgb(82, 82, 91),
        faint: Color::Rgb(161, 161, 170),
        accent: Color::Rgb(15, 118, 110),
        directory: Color::Rgb(29, 78, 216),
        good: Color::Rgb(21, 128, 61),
        caution: Color::Rgb(180, 83, 9),
        bad: Color::Rgb(185, 28, 28),
        mark: Color::Rgb(161, 98, 7),
    };
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    /// Row under the cursor.
    pub cursor: Style,

    // Message severities
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Chrome
    pub border: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub header: Style,
    pub footer: Style,
    pub command_prompt: Style,

    // Tree rows
    pub tree_lines: Style,
    pub directory: Style,
    pub file: Style,
    /// Explicitly excluded node.
    pub excluded: Style,
    /// Node below an excluded ancestor.
    pub hidden: Style,
    /// Selection marker.
    pub selected: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self::from_palette(ThemeVariant::Dark, Palette::DARK)
    }

    pub fn light() -> Self {
        Self::from_palette(ThemeVariant::Light, Palette::LIGHT)
    }

    fn from_palette(variant: ThemeVariant, p: Palette) -> Self {
        let bold = |color: Color| Style::new().fg(color).add_modifier(Modifier::BOLD);

        Self {
            variant,
            background: p.base,
            foreground: p.text,
            muted: p.subtle_text,

            cursor: Style::new()
                .bg(p.raised)
                .fg(p.strong_text)
                .add_modifier(Modifier::BOLD),

            success: p.good,
            warning: p.caution,
            error: p.bad,
            info: p.accent,

            border: Style::new().fg(p.faint),
            title: bold(p.accent),
            help_key: bold(p.accent),
            help_desc: Style::new().fg(p.subtle_text),
            header: Style::new().bg(p.surface).fg(p.strong_text),
            footer: Style::new().bg(p.surface).fg(p.subtle_text),
            command_prompt: bold(p.accent),

            tree_lines: Style::new().fg(p.faint),
            directory: bold(p.directory),
            file: Style::new().fg(p.text),
            excluded: Style::new().fg(p.bad).add_modifier(Modifier::CROSSED_OUT),
            hidden: Style::new().fg(p.faint).add_modifier(Modifier::DIM),
            selected: bold(p.mark),
        }
    }

    /// Create theme from variant.
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// The other variant.
    pub fn toggle(&self) -> Self {
        match self.variant {
            ThemeVariant::Dark => Self::light(),
            ThemeVariant::Light => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
