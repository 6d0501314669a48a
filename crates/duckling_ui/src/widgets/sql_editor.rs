use std::ops::Range;

use ratatui::{
    prelude::{Buffer, Rect, Widget},
    style::{Color, Modifier, Style},
};
use ratatui_textarea::{CursorMove, TextArea};

const PLACEHOLDER: &str = "-- write SQL here, F5 runs it";

/// Multi-line SQL editor on top of a [`TextArea`].
///
/// Selections are reported as byte ranges into [`SqlEditor::text`], so the
/// caller can slice the query it sends.
#[derive(Debug, Clone)]
pub struct SqlEditor {
    textarea: TextArea<'static>,
    is_focused: bool,
}

impl Default for SqlEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlEditor {
    #[must_use]
    pub fn new() -> Self {
        let mut editor = Self {
            textarea: TextArea::default(),
            is_focused: false,
        };
        editor.apply_style();
        editor
    }

    /// Editor contents with lines joined by `\n`
    #[must_use]
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Replace the whole buffer, e.g. after loading a script. The cursor
    /// ends up after the last character.
    pub fn set_text(&mut self, text: impl AsRef<str>) {
        let lines = text
            .as_ref()
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        self.textarea = TextArea::new(lines);
        self.apply_style();
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
        self.apply_style();
    }

    /// Byte range of the current selection, if it is not empty
    #[must_use]
    pub fn selection_range(&self) -> Option<Range<usize>> {
        let (from, to) = self.textarea.selection_range()?;
        let from = self.byte_offset(from);
        let to = self.byte_offset(to);
        (from != to).then(|| from.min(to)..from.max(to))
    }

    #[cfg(test)]
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection_range()?;
        self.text().get(range).map(str::to_string)
    }

    pub fn select_all(&mut self) {
        self.textarea.select_all();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.take_selection();
        if ch == '\n' {
            self.textarea.insert_newline();
        } else {
            self.textarea.insert_char(ch);
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        self.take_selection();
        self.textarea.insert_str(s);
    }

    pub fn backspace(&mut self) {
        if !self.take_selection() {
            self.textarea.delete_char();
        }
    }

    pub fn delete(&mut self) {
        if !self.take_selection() {
            self.textarea.delete_next_char();
        }
    }

    pub fn move_left(&mut self, extend: bool) {
        self.move_cursor(CursorMove::Back, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.move_cursor(CursorMove::Forward, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        self.move_cursor(CursorMove::Up, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        self.move_cursor(CursorMove::Down, extend);
    }

    pub fn move_home(&mut self, extend: bool) {
        self.move_cursor(CursorMove::Head, extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        self.move_cursor(CursorMove::End, extend);
    }

    /// Cursor as (row, column) in chars
    #[cfg(test)]
    fn cursor_position(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    fn move_cursor(&mut self, to: CursorMove, extend: bool) {
        if !extend {
            self.textarea.cancel_selection();
        } else if !self.textarea.is_selecting() {
            self.textarea.start_selection();
        }
        self.textarea.move_cursor(to);
    }

    /// Drop a non-empty selection; returns whether text was removed
    fn take_selection(&mut self) -> bool {
        if self.selection_range().is_some() {
            self.textarea.cut()
        } else {
            self.textarea.cancel_selection();
            false
        }
    }

    fn byte_offset(&self, (row, col): (usize, usize)) -> usize {
        let lines = self.textarea.lines();
        let before: usize =
            lines.iter().take(row).map(|line| line.len() + 1).sum();
        let within = lines.get(row).map_or(0, |line| {
            line.char_indices().nth(col).map_or(line.len(), |(idx, _)| idx)
        });
        before + within
    }

    fn apply_style(&mut self) {
        let (text, cursor) = if self.is_focused {
            (Color::White, Style::default().add_modifier(Modifier::REVERSED))
        } else {
            (Color::Gray, Style::default())
        };
        self.textarea.set_style(Style::default().fg(text));
        self.textarea.set_cursor_style(cursor);
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.set_placeholder_text(PLACEHOLDER);
        self.textarea
            .set_placeholder_style(Style::default().fg(Color::DarkGray));
    }
}

impl Widget for &SqlEditor {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self.textarea).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(text: &str) -> SqlEditor {
        let mut editor = SqlEditor::new();
        editor.set_text(text);
        editor
    }

    #[test]
    fn test_shift_selection() {
        let mut editor = editor("SELECT 1;");
        editor.move_home(false);
        for _ in 0..6 {
            editor.move_right(true);
        }
        assert_eq!(editor.selection_range(), Some(0..6));
        assert_eq!(editor.selected_text().as_deref(), Some("SELECT"));

        editor.move_right(false);
        assert_eq!(editor.selection_range(), None);
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut editor = editor("SELECT 1;");
        editor.move_left(false);
        editor.move_left(true);
        editor.insert_char('2');
        assert_eq!(editor.text(), "SELECT 2;");
        assert_eq!(editor.selection_range(), None);
    }

    #[test]
    fn test_backspace_removes_selection() {
        let mut editor = editor("abc");
        editor.select_all();
        editor.backspace();
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_selection_spans_lines() {
        let mut editor = editor("SELECT *\nFROM t");
        editor.move_up(true);
        editor.move_home(true);
        assert_eq!(editor.selection_range(), Some(0..15));
        assert_eq!(editor.selected_text().as_deref(), Some("SELECT *\nFROM t"));
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut editor = editor("SELECT 'ä'");
        editor.move_left(false);
        editor.move_left(true);
        assert_eq!(editor.selection_range(), Some(8..10));
        editor.backspace();
        assert_eq!(editor.text(), "SELECT ''");
    }

    #[test]
    fn test_set_text_keeps_trailing_newline() {
        let mut editor = editor("SELECT 1;\r\n");
        assert_eq!(editor.text(), "SELECT 1;\n");
        assert_eq!(editor.cursor_position(), (1, 0));
        editor.clear();
        assert_eq!(editor.text(), "");
    }
}
