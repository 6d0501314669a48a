use duckling_api::ConsoleApi;
use duckling_ui::widgets::{
    StatusLine,
    modal::ConnectionsModalView,
    results::ResultsPanel,
    top_bar_view::{CONSOLE_HOTKEYS, TopBarView},
};
use ratatui::{
    Frame,
    prelude::*,
    widgets::{Block, Borders},
};

use crate::app::{APP_NAME, APP_TITLE, App, Focus};

impl<A: ConsoleApi> App<A> {
    /// Renders the user interface.
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        self.area = frame.area();

        let [top, body, status] = Layout::vertical([
            Constraint::Length(7),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let top_block = Block::new()
            .borders(Borders::ALL)
            .title(format!(" {APP_TITLE} "))
            .title_alignment(Alignment::Center);
        let top_inner = top_block.inner(top);
        frame.render_widget(top_block, top);
        frame.render_widget(
            TopBarView {
                selector: &self.console.view.toolbar,
                controls: &self.console.view.controls,
                connection_detail: self.console.view.connection_detail.clone(),
                hotkeys: &CONSOLE_HOTKEYS,
                app_name: APP_NAME,
            },
            top_inner,
        );

        let [editor_area, results_area] = Layout::vertical([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .areas(body);
        self.render_editor(frame, editor_area);
        self.render_results(frame, results_area);

        frame.render_widget(
            StatusLine {
                message: &self.console.view.status_line,
                server: &self.server,
            },
            status,
        );

        self.render_modals(frame);
    }

    fn pane_block(title: &str, focused: bool) -> Block<'_> {
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::new()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
            .title_alignment(Alignment::Left)
    }

    /// The editor draws its own cursor
    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let block = Self::pane_block(" SQL ", self.focus == Focus::Editor);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(&self.editor, inner);
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let block = Self::pane_block(" Results ", self.focus == Focus::Results);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let notice = self.console.view.results.notice.as_ref();
        match self.results_table.as_mut() {
            Some(table) => {
                let mut view = std::mem::take(&mut table.view);
                frame.render_stateful_widget(
                    ResultsPanel {
                        notice,
                        table: Some(&*table),
                    },
                    inner,
                    &mut view,
                );
                table.view = view;
            }
            None => frame.render_stateful_widget(
                ResultsPanel {
                    notice,
                    table: None,
                },
                inner,
                &mut Default::default(),
            ),
        }
    }

    fn render_modals(&self, frame: &mut Frame) {
        let area = frame.area();
        let manager = &self.modal_manager;

        if manager.connections.is_open {
            let view = ConnectionsModalView {
                modal: &manager.connections,
                list: &self.console.view.modal_list,
                form: &self.console.editor.form,
                title: self.console.editor.title(),
            };
            if !manager.has_dialog()
                && let Some(position) = view.cursor_position(area)
            {
                frame.set_cursor_position(position);
            }
            frame.render_widget(view, area);
        }

        manager.render_dialogs(area, frame.buffer_mut());
        if manager.alert.is_none()
            && manager.confirmation.is_none()
            && let Some(prompt) = &manager.prompt
        {
            frame.set_cursor_position(prompt.cursor_position(area));
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::controller::{Console, fake::FakeApi};

    fn screen(app: &mut App<FakeApi>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_main_screen_shows_status_and_controls() {
        let mut app =
            App::new(Console::new(FakeApi::default()), "http://x/".into());
        app.console.refresh_connections().await;
        app.after_action();

        let text = screen(&mut app);
        assert!(text.contains("Disconnected. Active Config: None"));
        assert!(text.contains("No configurations"));
        assert!(text.contains("Connect"));
        assert!(text.contains("http://x/"));
    }

    #[tokio::test]
    async fn test_connections_modal_renders_form_title() {
        let mut app =
            App::new(Console::new(FakeApi::default()), String::new());
        app.modal_manager.connections.open();
        app.console.open_editor().await;

        let text = screen(&mut app);
        assert!(text.contains("Manage Connections"));
        assert!(text.contains("Add New Configuration"));
        assert_eq!(app.area, Rect::new(0, 0, 120, 40));
    }
}
