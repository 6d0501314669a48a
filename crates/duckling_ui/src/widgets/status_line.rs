use ratatui::{
    prelude::{Buffer, Constraint, Layout, Rect, Widget},
    style::{Color, Style},
    widgets::Paragraph,
};

/// The one-line status bar: outcome of the last action on the left, the
/// server being talked to on the right
#[derive(Clone, Debug, Default)]
pub struct StatusLine<'a> {
    pub message: &'a str,
    pub server: &'a str,
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let server_width =
            u16::try_from(self.server.chars().count()).unwrap_or(u16::MAX);
        let [message_area, server_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(server_width),
        ])
        .spacing(1)
        .areas(area);

        // A blank line still clears whatever was drawn before
        let message = if self.message.is_empty() {
            " "
        } else {
            self.message
        };
        Paragraph::new(message)
            .style(Style::default().fg(Color::White))
            .render(message_area, buf);
        Paragraph::new(self.server)
            .style(Style::default().fg(Color::DarkGray))
            .render(server_area, buf);
    }
}
