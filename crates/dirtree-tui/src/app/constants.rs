//! Application constants.

/// Number of items to move when pressing Page Up/Down.
pub const PAGE_SIZE: usize = 10;

/// Status text shown before any action.
pub const READY_MESSAGE: &str = "Ready";

/// Log file name inside the config directory.
pub const LOG_FILE: &str = "dirtree.log";

/// Settings file name inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";
