use color_eyre::Result;
use duckling_api::ConsoleApi;
use duckling_ui::widgets::{
    modal::ModalManager, sql_editor::SqlEditor, table::DataTable,
};
use ratatui::{DefaultTerminal, layout::Rect};
use tracing::info;

use crate::controller::{Console, Dialog};

pub const APP_NAME: &str = r"
     __
 ___( o)>  duckling
 \ <_. )
  `---'
";

pub const APP_TITLE: &str = "Duckling";

/// Which pane of the main screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Results,
}

/// What the open path prompt is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    LoadScript,
    SaveScript,
}

/// The main application which holds the state and logic of the application.
pub struct App<A> {
    /// Is the application running?
    pub(crate) running: bool,
    pub(crate) console: Console<A>,
    pub(crate) editor: SqlEditor,
    /// Table built from the controller's last result, with its view state
    pub(crate) results_table: Option<DataTable>,
    pub(crate) focus: Focus,
    pub(crate) modal_manager: ModalManager,
    pub(crate) prompt_purpose: Option<PromptPurpose>,
    /// Base URL shown in the status line
    pub(crate) server: String,
    /// Terminal area at the last draw, for mouse hit tests
    pub(crate) area: Rect,
}

impl<A: ConsoleApi> App<A> {
    #[must_use]
    pub fn new(console: Console<A>, server: String) -> Self {
        let mut editor = SqlEditor::new();
        editor.set_focused(true);
        Self {
            running: false,
            console,
            editor,
            results_table: None,
            focus: Focus::Editor,
            modal_manager: ModalManager::new(),
            prompt_purpose: None,
            server,
            area: Rect::default(),
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        info!(server = %self.server, "console started");

        // the list refresh chains a status refresh
        self.console.refresh_connections().await;
        self.after_action();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events().await?;
        }
        info!("console stopped");
        Ok(())
    }

    pub(crate) const fn quit(&mut self) {
        self.running = false;
    }

    pub(crate) fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.editor.set_focused(focus == Focus::Editor);
    }

    /// Pick up what the last controller action produced: a new results
    /// table and any dialog it raised
    pub(crate) fn after_action(&mut self) {
        let current = self.results_table.as_ref().map(|table| &table.model);
        if current != self.console.view.results.table.as_ref() {
            self.results_table =
                self.console.view.results.table.clone().map(DataTable::new);
        }

        match self.console.take_dialog() {
            Some(Dialog::Alert(message)) => {
                self.modal_manager.open_alert_modal(message);
            }
            Some(Dialog::Confirm(message)) => {
                self.modal_manager.open_confirmation_modal("Confirm", message);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use duckling_api::{ConnectionList, QueryResult};
    use duckling_ui::widgets::table::ResultTable;
    use serde_json::json;

    use super::*;
    use crate::controller::fake::FakeApi;

    fn app(api: FakeApi) -> App<FakeApi> {
        App::new(Console::new(api), "http://127.0.0.1:5001/".to_string())
    }

    #[tokio::test]
    async fn test_table_result_is_shown() {
        let api = FakeApi::default();
        let result: QueryResult = serde_json::from_value(json!({
            "data_type": "table",
            "columns": ["n"],
            "data": [{"n": 1}, {"n": 2}]
        }))
        .unwrap();
        api.query_replies.lock().unwrap().push_back(Ok(result));
        let mut app = app(api);

        app.console.run_query("SELECT n FROM t", None).await;
        app.after_action();

        let table = app.results_table.as_ref().unwrap();
        assert_eq!(
            table.model,
            ResultTable::new(
                vec!["n".to_string()],
                vec![vec!["1".to_string()], vec!["2".to_string()]]
            )
        );
        assert_eq!(table.view.state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_dialog_opens_modal() {
        let mut app = app(FakeApi::default());

        app.console.request_delete();
        app.after_action();

        assert!(app.modal_manager.alert.is_some());
        assert!(app.modal_manager.has_dialog());
    }

    #[tokio::test]
    async fn test_refresh_keeps_table_state() {
        let api = FakeApi::default();
        *api.list.lock().unwrap() = ConnectionList::default();
        let mut app = app(api);
        app.console.view.results.table = Some(ResultTable::new(
            vec!["a".to_string()],
            vec![vec!["x".to_string()], vec!["y".to_string()]],
        ));
        app.after_action();
        if let Some(table) = app.results_table.as_mut() {
            table.view.state.select(Some(1));
        }

        app.after_action();

        assert_eq!(
            app.results_table.as_ref().and_then(|t| t.view.state.selected()),
            Some(1)
        );
    }
}
