use ratatui::{
    prelude::{Buffer, Rect, Widget},
    style::{Color, Style},
    text::{Line, Span},
};

use super::hotkey::Hotkey;

/// Hotkeys laid out top to bottom, spilling into further columns
pub struct HotkeyView<'a> {
    pub hotkeys: &'a [Hotkey<'a>],
}

impl Widget for HotkeyView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let column_width = 24;
        let max_y = area.y + area.height;
        let max_x = area.x + area.width;
        let mut x = area.x;
        let mut y = area.y;

        for hotkey in self.hotkeys {
            if y >= max_y {
                x += column_width;
                y = area.y;
            }
            if x >= max_x {
                break;
            }

            let width = column_width.min(max_x - x);
            Line::from(vec![
                Span::styled(
                    format!("<{hotkey}>"),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(" {}", hotkey.description)),
            ])
            .render(Rect::new(x, y, width, 1), buf);

            y += 1;
        }
    }
}
