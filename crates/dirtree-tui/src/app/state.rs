//! Application state types.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use dirtree_core::profile::DEFAULT_PROFILE;

use crate::theme::ThemeVariant;

use super::constants::SETTINGS_FILE;

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Help,
    /// Command palette input mode (vim-style :command).
    Command,
    /// Entering a directory to open.
    OpeningDirectory,
    /// Entering an export file name.
    Exporting,
    /// Entering a name for a new profile.
    SavingProfileAs,
    /// Entering a pattern from the patterns dialog.
    AddingPattern,
    /// Confirming deletion of the active profile.
    ConfirmDeleteProfile,
    /// Picking a profile from the list.
    ProfilePicker,
    /// Patterns list dialog.
    Patterns,
    /// Warning or error dialog.
    Message,
    Quit,
}

impl AppMode {
    /// Modes that edit text in an [`InputState`](super::input::InputState).
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            Self::OpeningDirectory | Self::Exporting | Self::SavingProfileAs | Self::AddingPattern
        )
    }
}

/// Theme setting as stored in `settings.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeSetting {
    #[default]
    Dark,
    Light,
}

impl From<ThemeSetting> for ThemeVariant {
    fn from(setting: ThemeSetting) -> Self {
        match setting {
            ThemeSetting::Dark => ThemeVariant::Dark,
            ThemeSetting::Light => ThemeVariant::Light,
        }
    }
}

impl From<ThemeVariant> for ThemeSetting {
    fn from(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => ThemeSetting::Dark,
            ThemeVariant::Light => ThemeSetting::Light,
        }
    }
}

/// User settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Color theme.
    pub theme: ThemeSetting,
    /// Profile active when the app last switched profiles.
    pub last_profile: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeSetting::Dark,
            last_profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

impl UserSettings {
    /// Default settings file location.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("dirtree").join(SETTINGS_FILE))
    }

    /// Load settings from `path`, or return defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "invalid settings, using defaults: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to `path`.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }
}

/// Timestamped status bar text.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    text: String,
}

impl StatusLine {
    pub fn new(message: &str) -> Self {
        let mut status = Self::default();
        status.set(message);
        status
    }

    /// Replace the message, stamped with the local time.
    pub fn set(&mut self, message: &str) {
        self.text = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Contents of the message dialog.
#[derive(Debug, Clone)]
pub struct MessageDialog {
    pub title: &'static str,
    pub text: String,
    pub is_error: bool,
}

impl MessageDialog {
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            title: "Warning",
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            title: "Error",
            text: text.into(),
            is_error: true,
        }
    }
}

/// Cursor over a list of names, used by the profile picker.
#[derive(Debug, Clone, Default)]
pub struct ListCursor {
    pub items: Vec<String>,
    pub selected: usize,
}

impl ListCursor {
    /// Build a cursor positioned on `current` if present.
    pub fn new(items: Vec<String>, current: &str) -> Self {
        let selected = items.iter().position(|n| n == current).unwrap_or(0);
        Self { items, selected }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }
}

/// State for the patterns dialog.
#[derive(Debug, Clone, Default)]
pub struct PatternsState {
    pub list: ListCursor,
    /// Patterns marked for removal.
    pub marked: BTreeSet<String>,
}

impl PatternsState {
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            list: ListCursor {
                items: patterns,
                selected: 0,
            },
            marked: BTreeSet::new(),
        }
    }

    /// Refresh the list after the pattern set changed, keeping the cursor
    /// in range and dropping marks for patterns that are gone.
    pub fn refresh(&mut self, patterns: Vec<String>) {
        self.marked.retain(|p| patterns.contains(p));
        self.list.items = patterns;
        self.list.selected = self
            .list
            .selected
            .min(self.list.items.len().saturating_sub(1));
    }

    pub fn toggle_mark(&mut self) {
        let Some(current) = self.list.current().map(str::to_string) else {
            return;
        };
        if !self.marked.remove(&current) {
            self.marked.insert(current);
        }
    }

    /// Marked patterns, or the one under the cursor when nothing is marked.
    pub fn removal_targets(&self) -> Vec<String> {
        if self.marked.is_empty() {
            self.list.current().map(str::to_string).into_iter().collect()
        } else {
            self.marked.iter().cloned().collect()
        }
    }
}
