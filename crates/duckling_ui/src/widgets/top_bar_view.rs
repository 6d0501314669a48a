use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    prelude::{Buffer, Constraint, Layout, Rect, Widget},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{
    buttons::{Button, ButtonTone, Buttons},
    hotkey::Hotkey,
    hotkey_view::HotkeyView,
    select::{Selector, SelectorLine},
};

pub const CONSOLE_HOTKEYS: [Hotkey; 9] = [
    Hotkey {
        modifiers: KeyModifiers::NONE,
        keycode: KeyCode::F(5),
        description: "Run query",
    },
    Hotkey {
        modifiers: KeyModifiers::NONE,
        keycode: KeyCode::F(2),
        description: "Connect",
    },
    Hotkey {
        modifiers: KeyModifiers::CONTROL,
        keycode: KeyCode::Char('p'),
        description: "Prev config",
    },
    Hotkey {
        modifiers: KeyModifiers::CONTROL,
        keycode: KeyCode::Char('n'),
        description: "Next config",
    },
    Hotkey {
        modifiers: KeyModifiers::NONE,
        keycode: KeyCode::F(6),
        description: "Connections",
    },
    Hotkey {
        modifiers: KeyModifiers::NONE,
        keycode: KeyCode::F(3),
        description: "Load script",
    },
    Hotkey {
        modifiers: KeyModifiers::NONE,
        keycode: KeyCode::F(4),
        description: "Save script",
    },
    Hotkey {
        modifiers: KeyModifiers::NONE,
        keycode: KeyCode::F(1),
        description: "About",
    },
    Hotkey {
        modifiers: KeyModifiers::CONTROL,
        keycode: KeyCode::Char('q'),
        description: "Quit",
    },
];

/// Enabled state and labels of the toolbar controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub connect_label: String,
    pub connect_enabled: bool,
    pub connect_tone: ButtonTone,
    pub run_query_enabled: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            connect_label: "Connect".to_string(),
            connect_enabled: false,
            connect_tone: ButtonTone::Neutral,
            run_query_enabled: false,
        }
    }
}

pub struct TopBarView<'a> {
    pub selector: &'a Selector,
    pub controls: &'a Controls,
    /// Path and mode of the live connection, when there is one
    pub connection_detail: Option<String>,
    pub hotkeys: &'a [Hotkey<'a>],
    pub app_name: &'a str,
}

impl Widget for TopBarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [left, middle, right] = Layout::horizontal([
            Constraint::Percentage(40),
            Constraint::Percentage(45),
            Constraint::Percentage(15),
        ])
        .spacing(1)
        .areas(area);

        let [config_row, buttons_row, detail_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(left);

        let [label_area, selector_area] =
            Layout::horizontal([Constraint::Length(8), Constraint::Min(0)])
                .areas(config_row);
        Line::from(Span::styled("Config:", Style::default().fg(Color::Gray)))
            .render(label_area, buf);
        SelectorLine {
            selector: self.selector,
            placeholder: "No configurations",
            is_focused: false,
        }
        .render(selector_area, buf);

        Buttons {
            buttons: vec![
                Button::new(&self.controls.connect_label)
                    .tone(self.controls.connect_tone)
                    .enabled(self.controls.connect_enabled),
                Button::new("Run query")
                    .enabled(self.controls.run_query_enabled),
            ],
            selected: None,
        }
        .render(buttons_row, buf);

        if let Some(detail) = self.connection_detail {
            Paragraph::new(detail)
                .style(Style::default().fg(Color::DarkGray))
                .render(detail_row, buf);
        }

        HotkeyView {
            hotkeys: self.hotkeys,
        }
        .render(middle, buf);
        Paragraph::new(self.app_name.trim_start_matches('\n'))
            .style(Style::default().fg(Color::Yellow))
            .render(right, buf);
    }
}
