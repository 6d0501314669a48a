use duckling_api::{ConnectionConfig, ConsoleApi, SaveConnectionRequest};
use duckling_ui::widgets::config_form::ConfigForm;
use tracing::{info, warn};

use super::{Console, Pending, Resync};
use crate::errors::{DucklingError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Editing,
}

/// The modal form plus the name of the configuration it represents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEditor {
    pub form: ConfigForm,
    /// Set while the form shows an existing configuration
    editing: Option<String>,
}

impl ConfigEditor {
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        if self.editing.is_some() {
            EditorMode::Editing
        } else {
            EditorMode::New
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode() {
            EditorMode::New => "Add New Configuration",
            EditorMode::Editing => "Edit Configuration",
        }
    }

    #[cfg(test)]
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Back to an empty form for a new configuration
    pub fn clear(&mut self) {
        self.form.clear();
        self.editing = None;
    }

    /// Fill the form from the cached entry named `selected`. No selection
    /// resets to a new configuration; an unknown name leaves the form.
    pub fn load(&mut self, cache: &[ConnectionConfig], selected: Option<&str>) {
        let Some(name) = selected else {
            self.clear();
            return;
        };
        if let Some(config) = cache.iter().find(|c| c.name == name) {
            self.form.fill(&config.name, &config.path, config.read_only);
            self.editing = Some(config.name.clone());
        }
    }

    /// Validated save request from the form
    pub fn save_request(&self) -> Result<SaveConnectionRequest> {
        let name = self.form.trimmed_name();
        let path = self.form.trimmed_path();
        if name.is_empty() || path.is_empty() {
            return Err(DucklingError::Validation(
                "Configuration Name and Path are required.".to_string(),
            ));
        }
        Ok(SaveConnectionRequest {
            name: name.to_string(),
            path: path.to_string(),
            read_only: self.form.read_only,
            original_name: self.editing.clone(),
            confirm_create: None,
        })
    }

    /// The configuration a delete applies to. The edited configuration
    /// wins while its name is still in the form; otherwise the list
    /// selection.
    #[must_use]
    pub fn delete_target(&self, list_selection: Option<&str>) -> Option<String> {
        self.editing
            .as_deref()
            .filter(|&editing| editing == self.form.trimmed_name())
            .or(list_selection)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

impl<A: ConsoleApi> Console<A> {
    /// Opening the modal refreshes the list and starts a new entry
    pub async fn open_editor(&mut self) {
        self.refresh_connections().await;
        self.editor.clear();
    }

    pub async fn close_editor(&mut self) {
        self.refresh_connections().await;
    }

    pub fn new_config(&mut self) {
        self.editor.clear();
    }

    /// Load the highlighted modal list entry into the form
    pub fn load_selected(&mut self) {
        let selected = self.view.modal_list.value();
        self.editor.load(&self.connections, selected);
    }

    pub async fn save_config(&mut self) {
        match self.editor.save_request() {
            Ok(request) => self.submit_save(request).await,
            Err(err) => self.alert(err.to_string()),
        }
    }

    pub(super) async fn submit_save(&mut self, request: SaveConnectionRequest) {
        let confirmed = request.confirm_create == Some(true);
        info!(name = %request.name, confirmed, "saving configuration");
        match self.api.save_connection(&request).await {
            Ok(reply) if reply.requires_confirmation && !confirmed => {
                let message = reply.message.unwrap_or_else(|| {
                    format!("Create a new database at {}?", request.path)
                });
                self.confirm(message, Pending::CreateDatabase(request));
            }
            Ok(reply) => {
                self.alert(
                    reply
                        .message
                        .unwrap_or_else(|| "Configuration saved!".to_string()),
                );
                self.finish(Resync::Connections).await;
                self.editor.clear();
            }
            Err(err) => {
                warn!(%err, "save failed");
                let fallback = if confirmed {
                    "Failed to save configuration after confirmation."
                } else {
                    "Failed to save configuration."
                };
                self.alert(format!(
                    "Error saving configuration: {}",
                    err.message_or(fallback)
                ));
                self.finish(Resync::Connections).await;
            }
        }
    }

    /// Ask before deleting the targeted configuration
    pub fn request_delete(&mut self) {
        let list_selection = self.view.modal_list.value();
        match self.editor.delete_target(list_selection) {
            Some(name) => self.confirm(
                format!(
                    "Are you sure you want to delete configuration \"{name}\"?"
                ),
                Pending::Delete(name),
            ),
            None => self.alert("Please select a configuration to delete."),
        }
    }

    pub(super) async fn delete(&mut self, name: &str) {
        info!(name, "deleting configuration");
        match self.api.delete_connection(name).await {
            Ok(reply) => {
                self.alert(
                    reply
                        .message
                        .unwrap_or_else(|| "Configuration deleted.".to_string()),
                );
                self.finish(Resync::Connections).await;
                self.editor.clear();
            }
            Err(err) => {
                warn!(%err, name, "delete failed");
                self.alert(format!(
                    "Error deleting configuration: {}",
                    err.message_or("Failed to delete configuration.")
                ));
                self.finish(Resync::Connections).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use duckling_api::{ConnectionList, SaveResponse};

    use super::*;
    use crate::controller::{
        Dialog,
        fake::{Call, FakeApi, server_error},
    };

    fn config(name: &str, read_only: bool) -> ConnectionConfig {
        ConnectionConfig {
            name: name.to_string(),
            path: format!("/data/{name}.duckdb"),
            read_only,
        }
    }

    fn filled(name: &str, path: &str) -> ConfigEditor {
        let mut editor = ConfigEditor::default();
        editor.form.fill(name, path, false);
        editor
    }

    #[test]
    fn test_load_switches_mode() {
        let cache = [config("a", true), config("b", false)];
        let mut editor = ConfigEditor::default();
        assert_eq!(editor.title(), "Add New Configuration");

        editor.load(&cache, Some("a"));
        assert_eq!(editor.mode(), EditorMode::Editing);
        assert_eq!(editor.title(), "Edit Configuration");
        assert_eq!(editor.editing(), Some("a"));
        assert_eq!(editor.form.path.text(), "/data/a.duckdb");
        assert!(editor.form.read_only);

        editor.load(&cache, None);
        assert_eq!(editor, ConfigEditor::default());
    }

    #[test]
    fn test_save_request_requires_name_and_path() {
        let err = filled("  ", "/x").save_request().unwrap_err();
        assert_eq!(err.to_string(), "Configuration Name and Path are required.");
        assert!(filled("a", " ").save_request().is_err());

        let request = filled(" a ", " /x ").save_request().unwrap();
        assert_eq!(request.name, "a");
        assert_eq!(request.path, "/x");
        assert_eq!(request.original_name, None);
        assert_eq!(request.confirm_create, None);
    }

    #[test]
    fn test_delete_target_prefers_edited_name() {
        let cache = [config("a", false), config("b", false)];
        let mut editor = ConfigEditor::default();
        editor.load(&cache, Some("a"));

        assert_eq!(editor.delete_target(Some("b")).as_deref(), Some("a"));

        // renamed in the form: the list selection decides
        editor.form.name.set_text("renamed");
        assert_eq!(editor.delete_target(Some("b")).as_deref(), Some("b"));
        assert_eq!(editor.delete_target(None), None);

        assert_eq!(ConfigEditor::default().delete_target(None), None);
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let mut console = Console::new(FakeApi::default());

        console.save_config().await;

        assert!(console.api().calls().is_empty());
        assert_eq!(
            console.take_dialog(),
            Some(Dialog::Alert(
                "Configuration Name and Path are required.".to_string()
            ))
        );
    }

    fn needs_confirmation() -> FakeApi {
        let api = FakeApi::default();
        api.save_replies.lock().unwrap().push_back(Ok(SaveResponse {
            requires_confirmation: true,
            message: Some("Database file does not exist. Create it?".to_string()),
        }));
        api
    }

    #[tokio::test]
    async fn test_declined_confirmation_sends_one_request() {
        let mut console = Console::new(needs_confirmation());
        console.editor = filled("new", "/data/new.duckdb");

        console.save_config().await;
        assert_eq!(
            console.take_dialog(),
            Some(Dialog::Confirm(
                "Database file does not exist. Create it?".to_string()
            ))
        );
        assert!(console.has_pending());

        console.resolve_confirmation(false).await;

        assert_eq!(console.api().calls().len(), 1);
        assert_eq!(
            console.take_dialog(),
            Some(Dialog::Alert(
                "Configuration not saved as database creation was cancelled."
                    .to_string()
            ))
        );
        assert!(!console.has_pending());
        assert_eq!(console.editor.form.trimmed_name(), "new");
    }

    #[tokio::test]
    async fn test_accepted_confirmation_resubmits() {
        let mut console = Console::new(needs_confirmation());
        console.editor = filled("new", "/data/new.duckdb");

        console.save_config().await;
        console.take_dialog();
        console.resolve_confirmation(true).await;

        let calls = console.api().calls();
        let (Some(Call::Save(first)), Some(Call::Save(second))) =
            (calls.first(), calls.get(1))
        else {
            panic!("expected two save requests, got {calls:?}");
        };
        assert_eq!(second.confirm_create, Some(true));
        assert_eq!(first.confirm_create, None);
        assert_eq!(
            SaveConnectionRequest {
                confirm_create: None,
                ..second.clone()
            },
            *first
        );
        assert_eq!(calls.get(2), Some(&Call::Connections));
        assert_eq!(
            console.take_dialog(),
            Some(Dialog::Alert("Configuration saved!".to_string()))
        );
        assert_eq!(console.editor, ConfigEditor::default());
    }

    #[tokio::test]
    async fn test_save_failure_keeps_form() {
        let api = FakeApi::default();
        api.save_replies
            .lock()
            .unwrap()
            .push_back(Err(server_error(409, None)));
        let mut console = Console::new(api);
        console.editor = filled("a", "/x");

        console.save_config().await;

        assert_eq!(
            console.take_dialog(),
            Some(Dialog::Alert(
                "Error saving configuration: Failed to save configuration."
                    .to_string()
            ))
        );
        assert_eq!(console.editor.form.trimmed_name(), "a");
    }

    #[tokio::test]
    async fn test_edit_sends_original_name() {
        let api = FakeApi::default();
        *api.list.lock().unwrap() = ConnectionList {
            connections: vec![config("a", false)],
            active_connection_name: None,
        };
        let mut console = Console::new(api);
        console.refresh_connections().await;
        console.view.modal_list.select_value("a");
        console.load_selected();
        console.editor.form.name.set_text("b");
        console.api().clear_calls();

        console.save_config().await;

        let Some(Call::Save(request)) = console.api().calls().first().cloned()
        else {
            panic!("expected a save request");
        };
        assert_eq!(request.name, "b");
        assert_eq!(request.original_name.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_delete_needs_target_and_confirmation() {
        let mut console = Console::new(FakeApi::default());

        console.request_delete();
        assert_eq!(
            console.take_dialog(),
            Some(Dialog::Alert(
                "Please select a configuration to delete.".to_string()
            ))
        );

        console.editor = filled("a", "/x");
        console.editor.load(&[config("a", false)], Some("a"));
        console.request_delete();
        assert_eq!(
            console.take_dialog(),
            Some(Dialog::Confirm(
                "Are you sure you want to delete configuration \"a\"?"
                    .to_string()
            ))
        );

        console.resolve_confirmation(false).await;
        assert!(console.api().calls().is_empty());

        console.request_delete();
        console.resolve_confirmation(true).await;
        assert_eq!(
            console.api().calls(),
            vec![
                Call::Delete("a".to_string()),
                Call::Connections,
                Call::Status
            ]
        );
        assert_eq!(console.editor, ConfigEditor::default());
    }

    #[tokio::test]
    async fn test_open_editor_resets_form() {
        let mut console = Console::new(FakeApi::default());
        console.editor = filled("a", "/x");

        console.open_editor().await;

        assert_eq!(console.editor, ConfigEditor::default());
        assert_eq!(console.api().calls(), vec![Call::Connections, Call::Status]);
    }
}
