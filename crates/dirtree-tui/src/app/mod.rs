//! Main application state and logic.

pub(crate) mod commands;
pub(crate) mod constants;
pub mod input;
mod render;
pub mod state;

use std::path::{Path, PathBuf};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{DefaultTerminal, Frame};

use dirtree_core::profile::{DEFAULT_PROFILE, PROFILES_FILE};
use dirtree_core::ProfileStore;

use crate::event::KeyAction;
use crate::session::{Session, SessionError, SessionResult};
use crate::theme::Theme;
use crate::ui::{AppLayout, TreeState, VisibleItem, visible_items};
use crate::TuiConfig;

use self::commands::{CommandAction, CommandInput, CommandKeyResult, ThemeCommand, parse_command};
use self::constants::{PAGE_SIZE, READY_MESSAGE};
use self::input::{InputResult, InputState};
use self::render::{RenderContext, render_app};
use self::state::{AppMode, ListCursor, MessageDialog, PatternsState, StatusLine, UserSettings};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    session: Session,
    mode: AppMode,
    /// Mode to return to when the message dialog closes.
    return_mode: AppMode,
    theme: Theme,
    settings: UserSettings,
    settings_path: Option<PathBuf>,
    tree_state: TreeState,
    /// Tree rows visible in the last frame.
    viewport_height: usize,
    command_input: CommandInput,
    input_state: Option<InputState>,
    message: Option<MessageDialog>,
    profile_picker: ListCursor,
    patterns: PatternsState,
    status: StatusLine,
}

impl App {
    /// Create the application, loading settings and profiles and opening the
    /// initial directory if one was given.
    pub fn new(config: TuiConfig) -> Self {
        let settings_path = config.settings_path.or_else(UserSettings::config_path);
        let settings = settings_path
            .as_deref()
            .map(UserSettings::load)
            .unwrap_or_default();

        let profile_path = config
            .profile_path
            .or_else(ProfileStore::default_path)
            .unwrap_or_else(|| PathBuf::from(PROFILES_FILE));
        let store = ProfileStore::load(profile_path);
        let session = Session::new(store, &settings.last_profile);

        let mut app = Self {
            session,
            mode: AppMode::Normal,
            return_mode: AppMode::Normal,
            theme: Theme::from_variant(settings.theme.into()),
            settings,
            settings_path,
            tree_state: TreeState::default(),
            viewport_height: 20,
            command_input: CommandInput::new(),
            input_state: None,
            message: None,
            profile_picker: ListCursor::default(),
            patterns: PatternsState::default(),
            status: StatusLine::new(READY_MESSAGE),
        };

        if let Some(path) = config.initial_path {
            let result = app.open_path(&path);
            app.report(result);
        }
        app
    }

    /// Run the event loop until the user quits.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        while self.mode != AppMode::Quit {
            terminal.draw(|frame| App::render(&mut self, frame))?;

            if let Event::Key(key) = crossterm::event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }
        }
        tracing::debug!("event loop finished");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.viewport_height = AppLayout::new(area).tree_viewport();
        self.tree_state.ensure_visible(self.viewport_height);
        frame.render_widget(&*self, area);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn status(&self) -> &str {
        self.status.text()
    }

    /// Dispatch a key press according to the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Command => self.handle_command_key(key),
            mode if mode.is_text_input() => self.handle_input_key(mode, key),
            AppMode::ConfirmDeleteProfile => self.handle_confirm_key(key),
            AppMode::ProfilePicker => self.handle_picker_key(key),
            AppMode::Patterns => self.handle_patterns_key(key),
            AppMode::Message => {
                self.message = None;
                self.mode = self.return_mode;
            }
            AppMode::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                    self.mode = AppMode::Normal;
                }
            }
            _ => self.handle_action(KeyAction::from_key_event(key)),
        }
    }

    /// Show an action's result: success in the status line, failure in a
    /// dialog.
    fn report(&mut self, result: SessionResult) {
        match result {
            Ok(outcome) => {
                self.status.set(&outcome.message);
                if outcome.rescanned {
                    let len = self.visible_items().len();
                    self.tree_state.clamp(len);
                }
                self.remember_profile();
            }
            Err(err) => self.show_error(&err),
        }
    }

    fn show_error(&mut self, err: &SessionError) {
        let text = err.to_string();
        if err.is_warning() {
            tracing::debug!("rejected: {text}");
            self.message = Some(MessageDialog::warning(text));
        } else {
            tracing::error!("{text}");
            self.status.set(&format!("Error: {text}"));
            self.message = Some(MessageDialog::error(text));
        }
        self.return_mode = match self.mode {
            AppMode::Patterns => AppMode::Patterns,
            _ => AppMode::Normal,
        };
        self.mode = AppMode::Message;
    }

    /// Persist the active profile name once it changes.
    fn remember_profile(&mut self) {
        let active = self.session.active_profile();
        if self.settings.last_profile != active {
            self.settings.last_profile = active.to_string();
            self.save_settings();
        }
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save(path) {
            tracing::warn!(path = %path.display(), "failed to save settings: {e}");
        }
    }

    fn visible_items(&self) -> Vec<VisibleItem> {
        visible_items(self.session.tree(), &self.tree_state)
    }

    fn current_item(&self) -> Option<VisibleItem> {
        self.visible_items().into_iter().nth(self.tree_state.cursor)
    }

    /// Open a directory, resetting the view when the root changes.
    fn open_path(&mut self, raw: &Path) -> SessionResult {
        let before = self.session.directory().map(Path::to_path_buf);
        let result = self.session.open_directory(raw);
        if result.is_ok() && self.session.directory() != before.as_deref() {
            self.tree_state = TreeState::for_tree(self.session.tree());
        }
        result
    }

    fn start_input(&mut self, mode: AppMode, initial: &str) {
        self.input_state = Some(InputState::with_initial(initial));
        self.mode = mode;
    }

    fn begin_export(&mut self) {
        match self.session.default_export_name() {
            Some(name) => self.start_input(AppMode::Exporting, &name),
            None => self.show_error(&SessionError::NoDirectory),
        }
    }

    fn begin_open(&mut self) {
        let initial = self
            .session
            .directory()
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.start_input(AppMode::OpeningDirectory, &initial);
    }

    fn begin_delete_profile(&mut self) {
        if self.session.active_profile() == DEFAULT_PROFILE {
            let result = self.session.delete_active_profile();
            self.report(result);
        } else {
            self.mode = AppMode::ConfirmDeleteProfile;
        }
    }

    fn open_profile_picker(&mut self) {
        self.profile_picker =
            ListCursor::new(self.session.store().names(), self.session.active_profile());
        self.mode = AppMode::ProfilePicker;
    }

    fn open_patterns(&mut self) {
        self.patterns = PatternsState::new(self.session.patterns().to_vec());
        self.mode = AppMode::Patterns;
    }

    fn set_theme(&mut self, command: ThemeCommand) {
        self.theme = match command {
            ThemeCommand::Set(setting) => Theme::from_variant(setting.into()),
            ThemeCommand::Toggle => self.theme.toggle(),
        };
        self.settings.theme = self.theme.variant.into();
        self.save_settings();
    }

    fn handle_action(&mut self, action: KeyAction) {
        let len = self.visible_items().len();
        match action {
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,

            KeyAction::MoveUp => self.tree_state.move_up(1),
            KeyAction::MoveDown => self.tree_state.move_down(1, len),
            KeyAction::PageUp => self.tree_state.move_up(PAGE_SIZE),
            KeyAction::PageDown => self.tree_state.move_down(PAGE_SIZE, len),
            KeyAction::JumpToTop => self.tree_state.jump_to_top(),
            KeyAction::JumpToBottom => self.tree_state.jump_to_bottom(len),
            KeyAction::MoveLeft => self.collapse_or_parent(),
            KeyAction::MoveRight => self.expand_or_child(len),

            KeyAction::ToggleSelect => {
                if let Some(item) = self.current_item() {
                    self.session.tree_mut().toggle_selected(item.id);
                }
            }
            KeyAction::SelectRoots => {
                let roots = self.session.tree().roots().to_vec();
                let count = roots.len();
                self.session.tree_mut().set_selection(roots);
                self.status.set(&format!("Selected {count} root item(s)"));
            }
            KeyAction::Cancel => self.session.tree_mut().clear_selection(),

            KeyAction::Exclude => {
                let result = self.session.exclude_selected();
                self.report(result);
            }
            KeyAction::Include => {
                let result = self.session.include_selected();
                self.report(result);
            }
            KeyAction::AddToPatterns => {
                let result = self.session.add_selected_to_patterns();
                self.report(result);
            }
            KeyAction::ClearExclusions => {
                let result = self.session.clear_exclusions();
                self.report(result);
            }

            KeyAction::OpenDirectory => self.begin_open(),
            KeyAction::Export => self.begin_export(),
            KeyAction::Rescan => {
                let result = self.session.rescan();
                self.report(result);
            }
            KeyAction::OpenInFileManager => {
                if let Some(item) = self.current_item() {
                    let result = self.session.open_in_file_manager(item.id);
                    self.report(result);
                }
            }

            KeyAction::ProfilePicker => self.open_profile_picker(),
            KeyAction::PatternsDialog => self.open_patterns(),
            KeyAction::SaveProfile => {
                let result = self.session.save_current_profile();
                self.report(result);
            }
            KeyAction::SaveProfileAs => self.start_input(AppMode::SavingProfileAs, ""),
            KeyAction::DeleteProfile => self.begin_delete_profile(),

            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::ToggleTheme => self.set_theme(ThemeCommand::Toggle),
            KeyAction::CommandMode => {
                self.command_input.clear();
                self.mode = AppMode::Command;
            }

            KeyAction::None => {}
        }
    }

    fn collapse_or_parent(&mut self) {
        let items = self.visible_items();
        let Some(item) = items.get(self.tree_state.cursor) else {
            return;
        };
        let tree = self.session.tree();
        let Some(node) = tree.node(item.id) else {
            return;
        };
        if item.expanded {
            let path = node.path().to_path_buf();
            self.tree_state.collapse(&path);
        } else if let Some(parent) = node.parent
            && let Some(index) = items.iter().position(|i| i.id == parent)
        {
            self.tree_state.cursor = index;
        }
    }

    fn expand_or_child(&mut self, len: usize) {
        let Some(item) = self.current_item() else {
            return;
        };
        let tree = self.session.tree();
        let Some(node) = tree.node(item.id) else {
            return;
        };
        if !node.is_dir() {
            return;
        }
        if item.expanded {
            if !tree.children(item.id).is_empty() {
                self.tree_state.move_down(1, len);
            }
        } else {
            let path = node.path().to_path_buf();
            self.tree_state.expand(&path);
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match self.command_input.handle_key(key) {
            CommandKeyResult::Continue => {}
            CommandKeyResult::Cancel => self.mode = AppMode::Normal,
            CommandKeyResult::Execute(cmd) => {
                self.mode = AppMode::Normal;
                self.execute_command(&cmd);
            }
        }
    }

    fn execute_command(&mut self, cmd: &str) {
        tracing::debug!(command = cmd, "executing command");
        let result = match parse_command(cmd) {
            CommandAction::None => return,
            CommandAction::Quit => {
                self.mode = AppMode::Quit;
                return;
            }
            CommandAction::Open(Some(path)) => self.open_path(&expand_home(&path)),
            CommandAction::Open(None) => return self.begin_open(),
            CommandAction::Export(Some(file)) => self.session.export(expand_home(&file)),
            CommandAction::Export(None) => return self.begin_export(),
            CommandAction::Profile(Some(name)) => self.session.switch_profile(&name),
            CommandAction::Profile(None) => return self.open_profile_picker(),
            CommandAction::SaveAs(Some(name)) => self.session.save_profile_as(&name),
            CommandAction::SaveAs(None) => {
                return self.start_input(AppMode::SavingProfileAs, "");
            }
            CommandAction::Save => self.session.save_current_profile(),
            CommandAction::DeleteProfile => return self.begin_delete_profile(),
            CommandAction::Pattern(Some(name)) => self.session.add_pattern(&name),
            CommandAction::Pattern(None) => return self.open_patterns(),
            CommandAction::Unpattern(name) => self.session.remove_patterns(&[name]),
            CommandAction::ClearExclusions => self.session.clear_exclusions(),
            CommandAction::Rescan => self.session.rescan(),
            CommandAction::ShowHelp => {
                self.mode = AppMode::Help;
                return;
            }
            CommandAction::SetTheme(theme) => return self.set_theme(theme),
            CommandAction::Unknown(text) => {
                self.status.set(&format!("Unknown command: {text}"));
                return;
            }
        };
        self.report(result);
    }

    fn handle_input_key(&mut self, mode: AppMode, key: KeyEvent) {
        let Some(input) = self.input_state.as_mut() else {
            self.mode = AppMode::Normal;
            return;
        };
        let back = if mode == AppMode::AddingPattern {
            AppMode::Patterns
        } else {
            AppMode::Normal
        };

        match input.handle_key(key) {
            InputResult::Continue => {}
            InputResult::Cancel => {
                self.input_state = None;
                self.mode = back;
            }
            InputResult::Submit(value) => {
                if value.trim().is_empty() && mode != AppMode::SavingProfileAs {
                    input.set_error("Value cannot be empty");
                    return;
                }
                let result = match mode {
                    AppMode::OpeningDirectory => self.open_path(&expand_home(value.trim())),
                    AppMode::Exporting => self.session.export(expand_home(value.trim())),
                    AppMode::SavingProfileAs => self.session.save_profile_as(&value),
                    _ => self.session.add_pattern(&value),
                };

                // Fixable problems keep the dialog open with the message inline
                if let Err(err) = &result
                    && err.is_warning()
                    && let Some(input) = self.input_state.as_mut()
                {
                    input.set_error(err.to_string());
                    return;
                }

                self.input_state = None;
                self.mode = back;
                if back == AppMode::Patterns {
                    self.patterns.refresh(self.session.patterns().to_vec());
                }
                self.report(result);
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                self.mode = AppMode::Normal;
                let result = self.session.delete_active_profile();
                self.report(result);
            }
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => self.mode = AppMode::Normal,
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => self.profile_picker.move_up(),
            KeyCode::Char('j') | KeyCode::Down => self.profile_picker.move_down(),
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                if let Some(name) = self.profile_picker.current().map(str::to_string) {
                    let result = self.session.switch_profile(&name);
                    self.report(result);
                }
            }
            KeyCode::Char('q' | 'p') | KeyCode::Esc => self.mode = AppMode::Normal,
            _ => {}
        }
    }

    fn handle_patterns_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => self.patterns.list.move_up(),
            KeyCode::Char('j') | KeyCode::Down => self.patterns.list.move_down(),
            KeyCode::Char(' ') => self.patterns.toggle_mark(),
            KeyCode::Char('a') => self.start_input(AppMode::AddingPattern, ""),
            KeyCode::Char('d') | KeyCode::Delete => {
                let targets = self.patterns.removal_targets();
                let result = self.session.remove_patterns(targets.as_slice());
                self.patterns.refresh(self.session.patterns().to_vec());
                self.report(result);
            }
            KeyCode::Char('w') => {
                let result = self.session.save_current_profile();
                self.report(result);
            }
            KeyCode::Char('q' | 'P') | KeyCode::Esc => self.mode = AppMode::Normal,
            _ => {}
        }
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (raw, home) {
        ("~", Some(home)) => home,
        (raw, Some(home)) if raw.starts_with("~/") => home.join(&raw[2..]),
        (raw, _) => PathBuf::from(raw),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = RenderContext {
            mode: self.mode,
            theme: &self.theme,
            session: &self.session,
            tree_state: &self.tree_state,
            status: self.status.text(),
            command_input: self.command_input.buffer(),
            command_cursor: self.command_input.cursor(),
            input_state: self.input_state.as_ref(),
            message: self.message.as_ref(),
            profile_picker: &self.profile_picker,
            patterns: &self.patterns,
        };

        render_app(&ctx, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn shift(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// App over a small project with isolated config files.
    fn app_with_project() -> (TempDir, App) {
        let temp = TempDir::new().unwrap();
        let proj = temp.path().join("proj");
        fs::create_dir_all(proj.join("src")).unwrap();
        fs::create_dir_all(proj.join(".git")).unwrap();
        fs::write(proj.join("src/a.py"), "").unwrap();
        fs::write(proj.join("notes.txt"), "").unwrap();

        let config = TuiConfig::new()
            .with_config_dir(temp.path().join("config"))
            .with_initial_path(Some(proj));
        let app = App::new(config);
        (temp, app)
    }

    #[test]
    fn test_initial_path_is_opened() {
        let (_temp, app) = app_with_project();
        assert_eq!(app.session().tree().len(), 4);
        assert!(app.status().contains("Loaded"));
        assert_eq!(app.mode(), AppMode::Normal);
    }

    #[test]
    fn test_select_and_exclude_with_keys() {
        let (_temp, mut app) = app_with_project();

        // Row 1 is "src" under the expanded root
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Char('x')));

        let tree = app.session().tree();
        assert_eq!(tree.excluded_count(), 1);
        assert!(app.status().ends_with("Excluded 1 item(s)"));

        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.session().tree().excluded_count(), 0);
    }

    #[test]
    fn test_export_in_idle_shows_warning() {
        let temp = TempDir::new().unwrap();
        let mut app = App::new(TuiConfig::new().with_config_dir(temp.path()));

        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.mode(), AppMode::Message);
        app.handle_key(key(KeyCode::Char('z')));
        assert_eq!(app.mode(), AppMode::Normal);
    }

    #[test]
    fn test_save_as_duplicate_keeps_dialog_open() {
        let (_temp, mut app) = app_with_project();

        app.handle_key(shift('W'));
        assert_eq!(app.mode(), AppMode::SavingProfileAs);
        type_str(&mut app, "Default");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.mode(), AppMode::SavingProfileAs);
        assert!(app.input_state.as_ref().unwrap().error().is_some());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode(), AppMode::Normal);
        assert_eq!(app.session().active_profile(), DEFAULT_PROFILE);
    }

    #[test]
    fn test_command_palette_profile_flow() {
        let (_temp, mut app) = app_with_project();

        app.handle_key(shift(':'));
        type_str(&mut app, "saveas Python");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().active_profile(), "Python");
        assert_eq!(app.settings.last_profile, "Python");

        app.handle_key(shift('D'));
        assert_eq!(app.mode(), AppMode::ConfirmDeleteProfile);
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(app.session().active_profile(), DEFAULT_PROFILE);
        assert!(!app.session().store().contains("Python"));
    }

    #[test]
    fn test_collapse_and_expand_root() {
        let (_temp, mut app) = app_with_project();
        assert_eq!(app.visible_items().len(), 3);

        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.visible_items().len(), 1);

        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.visible_items().len(), 3);
    }

    #[test]
    fn test_patterns_dialog_add() {
        let (_temp, mut app) = app_with_project();

        app.handle_key(shift('P'));
        assert_eq!(app.mode(), AppMode::Patterns);
        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "dist");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.mode(), AppMode::Patterns);
        assert!(app.session().patterns().matches("dist"));
        assert!(app.patterns.list.items.contains(&"dist".to_string()));
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/x"), home.join("x"));
        }
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
    }
}
