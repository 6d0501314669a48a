use std::fmt::Display;

use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Clone)]
pub struct Hotkey<'a> {
    pub modifiers: KeyModifiers,
    pub keycode: KeyCode,
    pub description: &'a str,
}

impl Display for Hotkey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        match self.keycode {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            other => write!(f, "{other}"),
        }
    }
}
