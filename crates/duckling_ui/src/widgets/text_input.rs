/// A single-line text input. The cursor is a byte offset that always sits
/// on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `TextInput` with initial text and cursor at the end
    #[must_use]
    pub const fn with_text(text: String) -> Self {
        let cursor = text.len();
        Self { text, cursor }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars, for placing the terminal cursor
    #[must_use]
    pub fn cursor_column(&self) -> usize {
        self.text.get(..self.cursor).map_or(0, |s| s.chars().count())
    }

    /// Replace the text and move the cursor to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn add_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(ch) =
            self.text.get(self.cursor..).and_then(|s| s.chars().next())
        {
            self.cursor += ch.len_utf8();
        }
    }

    pub const fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub const fn move_cursor_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text
            .get(..self.cursor)
            .and_then(|s| s.char_indices().next_back())
            .map(|(idx, _)| idx)
    }
}
