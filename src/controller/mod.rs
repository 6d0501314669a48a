//! Session state and orchestration for the console.
//!
//! Every action follows the same flow: build a request, await the server,
//! update the view, then resynchronise from the server. Mutating actions
//! funnel through [`Console::finish`] so the resync cannot be skipped.

pub mod connections;
pub mod editor;
pub mod query;
pub mod status;

use duckling_api::{ConnectionConfig, ConsoleApi, SaveConnectionRequest};
use duckling_ui::widgets::{
    results::{Notice, ResultsView},
    select::Selector,
    top_bar_view::Controls,
};
use tracing::debug;

pub use editor::ConfigEditor;

/// A blocking dialog the UI has to show next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Alert(String),
    /// Answered through [`Console::resolve_confirmation`]
    Confirm(String),
}

/// An action waiting on a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    CreateDatabase(SaveConnectionRequest),
    Delete(String),
}

/// What to re-fetch once an action is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resync {
    Status,
    Connections,
}

/// Everything the terminal shows that the controller decides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleView {
    pub toolbar: Selector,
    pub modal_list: Selector,
    pub controls: Controls,
    pub status_line: String,
    /// Path and mode of the open database
    pub connection_detail: Option<String>,
    pub results: ResultsView,
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self {
            toolbar: connections::populate_toolbar(&[], None),
            modal_list: Selector::default(),
            controls: Controls::default(),
            status_line: "Ready.".to_string(),
            connection_detail: None,
            results: ResultsView::empty(),
        }
    }
}

pub struct Console<A> {
    api: A,
    /// Last list fetched from the server, replaced wholesale
    connections: Vec<ConnectionConfig>,
    pub editor: ConfigEditor,
    pub view: ConsoleView,
    dialog: Option<Dialog>,
    pending: Option<Pending>,
}

impl<A: ConsoleApi> Console<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            connections: Vec::new(),
            editor: ConfigEditor::default(),
            view: ConsoleView::default(),
            dialog: None,
            pending: None,
        }
    }

    #[cfg(test)]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[cfg(test)]
    pub fn connections(&self) -> &[ConnectionConfig] {
        &self.connections
    }

    /// The dialog raised by the last action, if any. Taking it hands it
    /// over to the UI.
    pub fn take_dialog(&mut self) -> Option<Dialog> {
        self.dialog.take()
    }

    #[cfg(test)]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn alert(&mut self, message: impl Into<String>) {
        self.dialog = Some(Dialog::Alert(message.into()));
    }

    fn confirm(&mut self, message: impl Into<String>, pending: Pending) {
        debug!(?pending, "awaiting confirmation");
        self.dialog = Some(Dialog::Confirm(message.into()));
        self.pending = Some(pending);
    }

    fn show(&mut self, notice: Notice) {
        self.view.results = ResultsView::with_notice(notice);
    }

    /// Post-action hook; runs after every mutating action whatever the
    /// outcome was
    async fn finish(&mut self, resync: Resync) {
        match resync {
            Resync::Status => self.refresh_status().await,
            Resync::Connections => self.refresh_connections().await,
        }
    }

    /// Answer the outstanding confirmation dialog
    pub async fn resolve_confirmation(&mut self, accepted: bool) {
        match self.pending.take() {
            Some(Pending::CreateDatabase(request)) => {
                if accepted {
                    self.submit_save(request.confirmed()).await;
                } else {
                    self.alert(
                        "Configuration not saved as database creation was \
                         cancelled.",
                    );
                }
            }
            Some(Pending::Delete(name)) => {
                if accepted {
                    self.delete(&name).await;
                }
            }
            None => {}
        }
    }
}
