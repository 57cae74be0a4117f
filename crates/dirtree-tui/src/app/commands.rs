//! Command palette handling.

use crossterm::event::{KeyCode, KeyEvent};

use super::input::{InputResult, InputState};
use super::state::ThemeSetting;

/// Command input state.
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
    input: InputState,
}

impl CommandInput {
    /// Create a new empty command input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the input buffer.
    pub fn clear(&mut self) {
        self.input = InputState::new();
    }

    /// Get the current input buffer.
    pub fn buffer(&self) -> &str {
        self.input.buffer()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Handle a key event, returning whether to execute the command.
    ///
    /// Backspace on an empty line leaves command mode.
    pub fn handle_key(&mut self, key: KeyEvent) -> CommandKeyResult {
        if key.code == KeyCode::Backspace && self.input.buffer().is_empty() {
            return CommandKeyResult::Cancel;
        }
        match self.input.handle_key(key) {
            InputResult::Continue => CommandKeyResult::Continue,
            InputResult::Cancel => {
                self.clear();
                CommandKeyResult::Cancel
            }
            InputResult::Submit(cmd) => {
                self.clear();
                CommandKeyResult::Execute(cmd)
            }
        }
    }
}

/// Result of handling a key in command mode.
#[derive(Debug, Clone)]
pub enum CommandKeyResult {
    /// Continue accepting input.
    Continue,
    /// Cancel command mode.
    Cancel,
    /// Execute the given command string.
    Execute(String),
}

/// Action to perform after executing a command.
///
/// Commands taking an optional argument open the matching input dialog
/// when it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Empty command line.
    None,
    /// Quit the application.
    Quit,
    /// Open a directory.
    Open(Option<String>),
    /// Export the structure to a file.
    Export(Option<String>),
    /// Switch profile; without a name, show the picker.
    Profile(Option<String>),
    /// Save patterns as a new profile.
    SaveAs(Option<String>),
    /// Save patterns to the active profile.
    Save,
    /// Delete the active profile.
    DeleteProfile,
    /// Add an exclusion pattern; without a name, show the patterns dialog.
    Pattern(Option<String>),
    /// Remove an exclusion pattern.
    Unpattern(String),
    /// Clear all exclusion marks.
    ClearExclusions,
    /// Rescan the current directory.
    Rescan,
    /// Show help.
    ShowHelp,
    /// Set theme.
    SetTheme(ThemeCommand),
    /// Command not recognized.
    Unknown(String),
}

/// Theme command variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCommand {
    Set(ThemeSetting),
    Toggle,
}

/// Parse a command line.
///
/// Everything after the command word is one argument, so paths and
/// patterns may contain spaces.
pub fn parse_command(cmd: &str) -> CommandAction {
    let cmd = cmd.trim();
    if cmd.is_empty() {
        return CommandAction::None;
    }
    let (name, arg) = match cmd.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim().to_string())),
        None => (cmd, None),
    };
    let arg = arg.filter(|a| !a.is_empty());

    match name {
        "q" | "quit" | "exit" => CommandAction::Quit,

        "open" | "cd" | "o" => CommandAction::Open(arg),
        "export" | "save-structure" | "w" => CommandAction::Export(arg),

        // Profiles
        "profile" | "p" => CommandAction::Profile(arg),
        "saveas" => CommandAction::SaveAs(arg),
        "save" => CommandAction::Save,
        "delprofile" => CommandAction::DeleteProfile,

        // Patterns
        "pattern" | "patterns" => CommandAction::Pattern(arg),
        "unpattern" => match arg {
            Some(name) => CommandAction::Unpattern(name),
            None => CommandAction::Pattern(None),
        },

        "clear" => CommandAction::ClearExclusions,
        "rescan" | "refresh" | "r" => CommandAction::Rescan,
        "help" | "?" => CommandAction::ShowHelp,

        "theme" | "t" => match arg.as_deref() {
            None | Some("toggle") => CommandAction::SetTheme(ThemeCommand::Toggle),
            Some(value) => value.parse::<ThemeSetting>().map_or_else(
                |_| CommandAction::Unknown(cmd.to_string()),
                |setting| CommandAction::SetTheme(ThemeCommand::Set(setting)),
            ),
        },
        "dark" => CommandAction::SetTheme(ThemeCommand::Set(ThemeSetting::Dark)),
        "light" => CommandAction::SetTheme(ThemeCommand::Set(ThemeSetting::Light)),

        _ => CommandAction::Unknown(cmd.to_string()),
    }
}
