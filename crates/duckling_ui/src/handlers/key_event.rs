use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::widgets::{sql_editor::SqlEditor, text_input::TextInput};

/// Macro to generate single-line text input key handling logic
macro_rules! text_input_keys {
    ($key:expr, $widget:expr) => {{
        match ($key.modifiers, $key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => {
                $widget.move_cursor_to_start();
                true
            }
            (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => {
                $widget.move_cursor_to_end();
                true
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                $widget.clear();
                true
            }
            (KeyModifiers::CONTROL | KeyModifiers::ALT, _) => false,
            (_, KeyCode::Char(ch)) if !ch.is_control() => {
                $widget.add_char(ch);
                true
            }
            (_, KeyCode::Backspace) => {
                $widget.delete_char();
                true
            }
            (_, KeyCode::Left) => {
                $widget.move_cursor_left();
                true
            }
            (_, KeyCode::Right) => {
                $widget.move_cursor_right();
                true
            }
            _ => false,
        }
    }};
}

/// Handles key events for a single-line input; returns whether the key
/// was consumed
pub fn handle_text_input(key: KeyEvent, input: &mut TextInput) -> bool {
    text_input_keys!(key, input)
}

/// Handles key events for the SQL editor. Shift extends the selection.
pub fn handle_editor_input(key: KeyEvent, editor: &mut SqlEditor) -> bool {
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => editor.select_all(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => editor.clear(),
        (KeyModifiers::CONTROL | KeyModifiers::ALT, _) => return false,
        (_, KeyCode::Char(ch)) if !ch.is_control() => editor.insert_char(ch),
        (_, KeyCode::Enter) => editor.insert_char('\n'),
        (_, KeyCode::Backspace) => editor.backspace(),
        (_, KeyCode::Delete) => editor.delete(),
        (_, KeyCode::Left) => editor.move_left(extend),
        (_, KeyCode::Right) => editor.move_right(extend),
        (_, KeyCode::Up) => editor.move_up(extend),
        (_, KeyCode::Down) => editor.move_down(extend),
        (_, KeyCode::Home) => editor.move_home(extend),
        (_, KeyCode::End) => editor.move_end(extend),
        _ => return false,
    }
    true
}

/// Bracketed paste into the editor
pub fn handle_editor_paste(text: &str, editor: &mut SqlEditor) {
    editor.insert_str(&text.replace("\r\n", "\n"));
}
