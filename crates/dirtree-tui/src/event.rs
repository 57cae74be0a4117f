//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    /// Collapse the directory, or move to its parent.
    MoveLeft,
    /// Expand the directory, or move to its first child.
    MoveRight,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Selection
    /// Toggle selection of the current item (Space).
    ToggleSelect,
    /// Select every root node.
    SelectRoots,
    /// Clear the selection.
    Cancel,

    // Exclusions
    Exclude,
    Include,
    AddToPatterns,
    ClearExclusions,

    // Directory and export
    OpenDirectory,
    Export,
    Rescan,
    /// Open the directory under the cursor in the file manager.
    OpenInFileManager,

    // Profiles and patterns
    ProfilePicker,
    PatternsDialog,
    SaveProfile,
    SaveProfileAs,
    DeleteProfile,

    // UI
    ToggleHelp,
    ToggleTheme,
    CommandMode,

    // Application
    Quit,
    ForceQuit,

    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::MoveLeft,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::MoveRight,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Left, _) => KeyAction::MoveLeft,
            (KeyCode::Right, _) => KeyAction::MoveRight,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            // Selection
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::ToggleSelect,
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => KeyAction::SelectRoots,

            // Exclusions
            (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::Exclude,
            (KeyCode::Delete, _) => KeyAction::Exclude,
            (KeyCode::Char('u'), KeyModifiers::NONE) => KeyAction::Include,
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::AddToPatterns,
            (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::ClearExclusions,

            // Directory and export
            (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::OpenDirectory,
            (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::Export,
            (KeyCode::Char('R'), KeyModifiers::SHIFT) => KeyAction::Rescan,
            (KeyCode::Enter, _) => KeyAction::OpenInFileManager,

            // Profiles and patterns
            (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::ProfilePicker,
            (KeyCode::Char('P'), KeyModifiers::SHIFT) => KeyAction::PatternsDialog,
            (KeyCode::Char('w'), KeyModifiers::NONE) => KeyAction::SaveProfile,
            (KeyCode::Char('W'), KeyModifiers::SHIFT) => KeyAction::SaveProfileAs,
            (KeyCode::Char('D'), KeyModifiers::SHIFT) => KeyAction::DeleteProfile,

            // UI toggles
            (KeyCode::Char('?'), KeyModifiers::NONE | KeyModifiers::SHIFT) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,

            // Command palette
            (KeyCode::Char(':'), KeyModifiers::NONE | KeyModifiers::SHIFT) => KeyAction::CommandMode,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Navigation",
            bindings: vec![
                KeyBinding { keys: "j/k ↑/↓", description: "Move up/down" },
                KeyBinding { keys: "h/l ←/→", description: "Collapse/expand" },
                KeyBinding { keys: "g/G", description: "Jump to top/bottom" },
                KeyBinding { keys: "Ctrl-u/d", description: "Page up/down" },
                KeyBinding { keys: "Enter", description: "Open in file manager" },
            ],
        },
        HelpSection {
            title: "Selection & Exclusion",
            bindings: vec![
                KeyBinding { keys: "Space", description: "Toggle selection" },
                KeyBinding { keys: "Ctrl-a", description: "Select all roots" },
                KeyBinding { keys: "Esc", description: "Clear selection" },
                KeyBinding { keys: "x/Del", description: "Exclude selected" },
                KeyBinding { keys: "u", description: "Include selected" },
                KeyBinding { keys: "a", description: "Add names to patterns" },
                KeyBinding { keys: "c", description: "Clear exclusions" },
            ],
        },
        HelpSection {
            title: "Directory & Export",
            bindings: vec![
                KeyBinding { keys: "o", description: "Open directory" },
                KeyBinding { keys: "R", description: "Rescan" },
                KeyBinding { keys: "s", description: "Export structure" },
            ],
        },
        HelpSection {
            title: "Profiles",
            bindings: vec![
                KeyBinding { keys: "p", description: "Switch profile" },
                KeyBinding { keys: "P", description: "Manage patterns" },
                KeyBinding { keys: "w", description: "Save profile" },
                KeyBinding { keys: "W", description: "Save profile as" },
                KeyBinding { keys: "D", description: "Delete profile" },
            ],
        },
        HelpSection {
            title: "Commands",
            bindings: vec![
                KeyBinding { keys: ":", description: "Open command palette" },
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}

/// Get command palette commands for help display.
pub fn get_command_help() -> Vec<(&'static str, &'static str)> {
    vec![
        (":open <path>", "Open directory"),
        (":export [file]", "Export structure"),
        (":profile [name]", "Switch profile"),
        (":saveas <name>", "Save as new profile"),
        (":save", "Save active profile"),
        (":delprofile", "Delete active profile"),
        (":pattern <name>", "Add pattern"),
        (":unpattern <name>", "Remove pattern"),
        (":clear", "Clear exclusions"),
        (":rescan", "Rescan directory"),
        (":theme dark|light", "Set theme"),
        (":help", "Show help"),
        (":q :quit", "Quit application"),
    ]
}
