use std::path::Path;

use color_eyre::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use duckling_api::ConsoleApi;
use duckling_ui::{
    handlers::{
        TableNavigationHandler, handle_editor_input, handle_editor_paste,
    },
    widgets::{
        modal::{
            AlertModal, ConnectionsAction, ConnectionsModal, INFO_MODAL_SIZE,
            PromptModal, PromptOutcome, centered,
        },
        results::{Notice, ResultsView},
    },
};
use ratatui::layout::Position;
use tracing::debug;

use crate::{
    app::{APP_TITLE, App, Focus, PromptPurpose},
    scripts,
};

impl<A: ConsoleApi> App<A> {
    /// Reads the crossterm events and updates the state of [`App`].
    pub(crate) async fn handle_crossterm_events(&mut self) -> Result<()> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.on_key_event(key).await;
            }
            Event::Mouse(mouse) => self.on_mouse_event(mouse).await,
            Event::Paste(text) => {
                if !self.modal_manager.is_any_modal_open()
                    && self.focus == Focus::Editor
                {
                    handle_editor_paste(&text, &mut self.editor);
                }
            }
            Event::Key(_)
            | Event::FocusGained
            | Event::FocusLost
            | Event::Resize(_, _) => {}
        }

        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub(crate) async fn on_key_event(&mut self, key: KeyEvent) {
        if self.modal_manager.has_dialog() {
            self.handle_dialog_key(key).await;
        } else if self.modal_manager.connections.is_open {
            self.handle_connections_key(key).await;
        } else {
            self.handle_main_key(key).await;
        }
        self.after_action();
    }

    async fn handle_main_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q' | 'c')) => self.quit(),
            (_, KeyCode::F(1)) => {
                let body = format!(
                    "{APP_TITLE}\nVersion {}\n\n{}",
                    env!("CARGO_PKG_VERSION"),
                    env!("CARGO_PKG_DESCRIPTION")
                );
                self.modal_manager.open_info_modal(APP_TITLE, &body);
            }
            (_, KeyCode::F(2)) => self.console.toggle_connection().await,
            (_, KeyCode::F(3)) => self.open_prompt(PromptPurpose::LoadScript),
            (_, KeyCode::F(4)) => self.open_prompt(PromptPurpose::SaveScript),
            (_, KeyCode::F(5)) => {
                if self.console.view.controls.run_query_enabled {
                    self.console
                        .run_query(
                            &self.editor.text(),
                            self.editor.selection_range(),
                        )
                        .await;
                }
            }
            (_, KeyCode::F(6)) => {
                self.modal_manager.connections.open();
                self.console.open_editor().await;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
                self.console.cycle_active(false).await;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.console.cycle_active(true).await;
            }
            (_, KeyCode::Tab) => {
                let focus = match self.focus {
                    Focus::Editor => Focus::Results,
                    Focus::Results => Focus::Editor,
                };
                self.set_focus(focus);
            }
            _ => match self.focus {
                Focus::Editor => {
                    handle_editor_input(key, &mut self.editor);
                }
                Focus::Results => {
                    if let Some(table) = self.results_table.as_mut() {
                        TableNavigationHandler::navigate(table, key.code);
                    }
                }
            },
        }
    }

    async fn handle_connections_key(&mut self, key: KeyEvent) {
        let action = self.modal_manager.connections.handle_key_events(
            key,
            &mut self.console.view.modal_list,
            &mut self.console.editor.form,
        );
        debug!(?action, "connections modal");
        match action {
            ConnectionsAction::None => {}
            ConnectionsAction::Load => self.console.load_selected(),
            ConnectionsAction::New => self.console.new_config(),
            ConnectionsAction::Save => self.console.save_config().await,
            ConnectionsAction::Delete => self.console.request_delete(),
            ConnectionsAction::Close => self.console.close_editor().await,
        }
    }

    /// Dialogs stack above everything; the most urgent one takes the key
    async fn handle_dialog_key(&mut self, key: KeyEvent) {
        if self.modal_manager.alert.is_some() {
            if AlertModal::handle_key_events(key) {
                self.modal_manager.alert = None;
            }
        } else if let Some(confirmation) = self.modal_manager.confirmation.as_mut()
        {
            if let Some(accepted) = confirmation.handle_key_events(key) {
                self.modal_manager.confirmation = None;
                self.console.resolve_confirmation(accepted).await;
            }
        } else if let Some(prompt) = self.modal_manager.prompt.as_mut() {
            if let Some(outcome) = prompt.handle_key_events(key) {
                self.modal_manager.prompt = None;
                let purpose = self.prompt_purpose.take();
                if let (PromptOutcome::Submitted(file), Some(purpose)) =
                    (outcome, purpose)
                {
                    self.finish_prompt(purpose, file.trim()).await;
                }
            }
        } else if self.modal_manager.info.is_some()
            && matches!(
                key.code,
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
            )
        {
            self.modal_manager.info = None;
        }
    }

    /// A left click outside an open modal closes it
    async fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);

        if self.modal_manager.info.is_some() {
            let (width, height) = INFO_MODAL_SIZE;
            if !centered(self.area, width, height).contains(position) {
                self.modal_manager.info = None;
            }
        } else if self.modal_manager.has_dialog() {
            // alerts, confirmations and prompts need an explicit answer
        } else if self.modal_manager.connections.is_open
            && !ConnectionsModal::area(self.area).contains(position)
        {
            self.modal_manager.connections.close();
            self.console.close_editor().await;
            self.after_action();
        }
    }

    fn open_prompt(&mut self, purpose: PromptPurpose) {
        let prompt = match purpose {
            PromptPurpose::LoadScript => {
                PromptModal::new("Load Script", "File to load:", "")
            }
            PromptPurpose::SaveScript => PromptModal::new(
                "Save Script",
                "Enter filename to save (e.g., query.sql):",
                scripts::DEFAULT_SCRIPT_NAME,
            ),
        };
        self.prompt_purpose = Some(purpose);
        self.modal_manager.open_prompt_modal(prompt);
    }

    async fn finish_prompt(&mut self, purpose: PromptPurpose, file: &str) {
        // an empty name aborts
        if file.is_empty() {
            return;
        }
        let path = Path::new(file);
        let name = scripts::display_name(path);
        let view = &mut self.console.view;

        match purpose {
            PromptPurpose::LoadScript => match scripts::load(path).await {
                Ok(text) => {
                    self.editor.set_text(text);
                    view.results = ResultsView::with_notice(Notice::info(
                        format!("Loaded script: {name}"),
                    ));
                    view.status_line = format!("File loaded: {name}");
                }
                Err(err) => {
                    view.results = ResultsView::with_notice(Notice::error(
                        format!("Error loading script {name}: {err}"),
                    ));
                }
            },
            PromptPurpose::SaveScript => {
                match scripts::save(path, &self.editor.text()).await {
                    Ok(()) => {
                        view.results = ResultsView::with_notice(Notice::info(
                            format!("Script {name} saved."),
                        ));
                        view.status_line = format!("Script saved: {name}");
                    }
                    Err(err) => {
                        view.results = ResultsView::with_notice(Notice::error(
                            format!("Error saving script {name}: {err}"),
                        ));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use duckling_api::{ConnectionConfig, ConnectionList, ConnectionStatus};
    use duckling_ui::widgets::results::Tone;

    use super::*;
    use crate::controller::{
        Console,
        fake::{Call, FakeApi},
    };

    fn app(api: FakeApi) -> App<FakeApi> {
        let mut app = App::new(Console::new(api), String::new());
        app.area = ratatui::layout::Rect::new(0, 0, 120, 40);
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App<FakeApi>, text: &str) {
        for ch in text.chars() {
            app.on_key_event(key(KeyCode::Char(ch))).await;
        }
    }

    #[tokio::test]
    async fn test_run_query_needs_connection() {
        let mut app = app(FakeApi::default());
        type_text(&mut app, "SELECT 1").await;

        app.on_key_event(key(KeyCode::F(5))).await;
        assert!(app.console.api().calls().is_empty());

        app.console.view.controls.run_query_enabled = true;
        app.on_key_event(key(KeyCode::F(5))).await;
        assert_eq!(
            app.console.api().calls(),
            vec![Call::Query("SELECT 1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app(FakeApi::default());
        app.running = true;
        app.on_key_event(ctrl('q')).await;
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_manage_connections_flow() {
        let api = FakeApi::default();
        *api.list.lock().unwrap() = ConnectionList {
            connections: vec![ConnectionConfig {
                name: "main".to_string(),
                path: "/data/main.duckdb".to_string(),
                read_only: true,
            }],
            active_connection_name: Some("main".to_string()),
        };
        *api.status.lock().unwrap() = ConnectionStatus {
            active_config_name: Some("main".to_string()),
            ..ConnectionStatus::default()
        };
        let mut app = app(api);

        app.on_key_event(key(KeyCode::F(6))).await;
        assert!(app.modal_manager.connections.is_open);

        app.on_key_event(key(KeyCode::Down)).await;
        app.on_key_event(key(KeyCode::Enter)).await;
        assert_eq!(app.console.editor.editing(), Some("main"));
        assert_eq!(app.console.editor.title(), "Edit Configuration");

        app.on_key_event(ctrl('d')).await;
        assert!(app.modal_manager.confirmation.is_some());
        app.on_key_event(key(KeyCode::Char('n'))).await;
        assert!(app.modal_manager.confirmation.is_none());

        app.console.api().clear_calls();
        app.on_key_event(key(KeyCode::Esc)).await;
        assert!(!app.modal_manager.connections.is_open);
        assert_eq!(
            app.console.api().calls(),
            vec![Call::Connections, Call::Status]
        );
    }

    #[tokio::test]
    async fn test_click_outside_closes_modal() {
        let mut app = app(FakeApi::default());
        app.on_key_event(key(KeyCode::F(6))).await;
        app.console.api().clear_calls();

        let inside = ConnectionsModal::area(app.area);
        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: inside.x + 1,
            row: inside.y + 1,
            modifiers: KeyModifiers::NONE,
        })
        .await;
        assert!(app.modal_manager.connections.is_open);

        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
        .await;
        assert!(!app.modal_manager.connections.is_open);
        assert_eq!(
            app.console.api().calls(),
            vec![Call::Connections, Call::Status]
        );
    }

    #[tokio::test]
    async fn test_save_and_load_script_through_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.sql");
        let file = file.to_str().unwrap();
        let mut app = app(FakeApi::default());
        type_text(&mut app, "SELECT 42;").await;

        app.on_key_event(key(KeyCode::F(4))).await;
        app.on_key_event(ctrl('u')).await;
        type_text(&mut app, file).await;
        app.on_key_event(key(KeyCode::Enter)).await;
        assert_eq!(app.console.view.status_line, "Script saved: report.sql");

        app.editor.clear();
        app.on_key_event(key(KeyCode::F(3))).await;
        type_text(&mut app, file).await;
        app.on_key_event(key(KeyCode::Enter)).await;

        assert_eq!(app.editor.text(), "SELECT 42;");
        assert_eq!(app.console.view.status_line, "File loaded: report.sql");
        let notice = app.console.view.results.notice.clone().unwrap();
        assert_eq!(notice.tone, Tone::Info);
        assert_eq!(notice.text, "Loaded script: report.sql");
    }

    #[tokio::test]
    async fn test_empty_save_name_aborts() {
        let mut app = app(FakeApi::default());
        let before = app.console.view.clone();

        app.on_key_event(key(KeyCode::F(4))).await;
        app.on_key_event(ctrl('u')).await;
        app.on_key_event(key(KeyCode::Enter)).await;

        assert!(!app.modal_manager.has_dialog());
        assert_eq!(app.console.view, before);
    }
}
