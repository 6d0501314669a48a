use ratatui::{
    prelude::{Buffer, Rect, Widget},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Colour of a button, mirroring what the action does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonTone {
    #[default]
    Neutral,
    Positive,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button<'a> {
    pub label: &'a str,
    pub tone: ButtonTone,
    pub enabled: bool,
}

impl<'a> Button<'a> {
    #[must_use]
    pub const fn new(label: &'a str) -> Self {
        Self {
            label,
            tone: ButtonTone::Neutral,
            enabled: true,
        }
    }

    #[must_use]
    pub const fn tone(mut self, tone: ButtonTone) -> Self {
        self.tone = tone;
        self
    }

    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn style(&self, focused: bool) -> Style {
        if !self.enabled {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT);
        }
        let bg = match self.tone {
            ButtonTone::Neutral if focused => Color::Blue,
            ButtonTone::Neutral => Color::DarkGray,
            ButtonTone::Positive => Color::Green,
            ButtonTone::Danger => Color::Red,
        };
        let style = Style::default().fg(Color::White).bg(bg);
        if focused {
            style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            style
        }
    }
}

/// A row of buttons; `selected` is the focused one, if any
pub struct Buttons<'a> {
    pub buttons: Vec<Button<'a>>,
    pub selected: Option<usize>,
}

impl Widget for Buttons<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, button) in self.buttons.iter().enumerate() {
            let focused = self.selected == Some(i);
            spans.push(Span::styled(
                format!(" {} ", button.label),
                button.style(focused),
            ));
            spans.push(Span::raw(" "));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
