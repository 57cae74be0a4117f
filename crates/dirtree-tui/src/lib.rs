//! Terminal user interface for dirtree.
//!
//! This crate provides an interactive TUI for pruning a directory tree
//! before exporting it as text, built with ratatui.
//!
//! # Overview
//!
//! - **Structure view** - Browse the scanned tree, excluded items struck out
//! - **Profiles** - Switch, save and delete named exclusion pattern sets
//! - **Patterns dialog** - Review, add and remove the active patterns
//! - **Export** - Write the tree minus excluded subtrees to a text file
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Run the TUI on a directory
//! dirtree_tui::run(Some(PathBuf::from("/path/to/project"))).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `h`/`l` - Collapse/expand directories
//! - `Space` - Select item
//! - `x`/`u` - Exclude/include selection
//! - `a` - Add selected names to the patterns
//! - `s` - Export
//! - `p` - Switch profile
//! - `:` - Command palette
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod opener;
pub mod session;
mod theme;
mod ui;

use std::path::PathBuf;

pub use app::{App, AppResult};
pub use app::constants::{LOG_FILE, SETTINGS_FILE};
pub use session::{Outcome, Session, SessionError};
pub use theme::Theme;

/// Startup options for the TUI.
#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    /// Directory opened on startup.
    pub initial_path: Option<PathBuf>,
    /// Profile store location; the platform config dir when unset.
    pub profile_path: Option<PathBuf>,
    /// Settings file location; the platform config dir when unset.
    pub settings_path: Option<PathBuf>,
}

impl TuiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_path(mut self, path: Option<PathBuf>) -> Self {
        self.initial_path = path;
        self
    }

    pub fn with_profile_path(mut self, path: PathBuf) -> Self {
        self.profile_path = Some(path);
        self
    }

    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    /// Keep profiles and settings together under `dir`.
    pub fn with_config_dir(self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.with_profile_path(dir.join(dirtree_core::profile::PROFILES_FILE))
            .with_settings_path(dir.join(SETTINGS_FILE))
    }
}

/// Run the TUI application.
pub fn run(path: Option<PathBuf>) -> AppResult<()> {
    run_with_config(TuiConfig::new().with_initial_path(path))
}

/// Run the TUI application with explicit startup options.
pub fn run_with_config(config: TuiConfig) -> AppResult<()> {
    let app = App::new(config);

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();

    result
}
