//! Input state for text input modes (open, export, profile names, patterns).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// State for text input operations.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    /// Validation error message.
    error: Option<String>,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input state with an initial value and the cursor at the end.
    pub fn with_initial(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.len(),
            error: None,
        }
    }

    /// Get the current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters, for rendering.
    pub fn cursor(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    /// Get the current error message (if any).
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set an error message.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Handle a key event.
    ///
    /// Returns the result of handling the key.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        self.error = None;

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => InputResult::Submit(self.buffer.clone()),

            (KeyCode::Esc, _) => InputResult::Cancel,

            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    let start = self.prev_boundary();
                    self.buffer.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
                InputResult::Continue
            }

            (KeyCode::Delete, _) => {
                let end = self.next_boundary();
                self.buffer.replace_range(self.cursor..end, "");
                InputResult::Continue
            }

            (KeyCode::Left, _) => {
                self.cursor = self.prev_boundary();
                InputResult::Continue
            }

            (KeyCode::Right, _) => {
                self.cursor = self.next_boundary();
                InputResult::Continue
            }

            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                InputResult::Continue
            }

            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.buffer.len();
                InputResult::Continue
            }

            // Ctrl-U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor = 0;
                InputResult::Continue
            }

            // Ctrl-W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                let before = &self.buffer[..self.cursor];
                let word_start = before
                    .trim_end()
                    .rfind(char::is_whitespace)
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.buffer.replace_range(word_start..self.cursor, "");
                self.cursor = word_start;
                InputResult::Continue
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                InputResult::Continue
            }

            _ => InputResult::Continue,
        }
    }
}

/// Result of handling input.
#[derive(Debug, Clone)]
pub enum InputResult {
    /// Continue accepting input.
    Continue,
    /// User cancelled the input.
    Cancel,
    /// User submitted the input with this value.
    Submit(String),
}
