use duckling_api::{ApiError, ConnectionStatus, ConsoleApi};
use duckling_ui::widgets::{
    buttons::ButtonTone, results::Notice, top_bar_view::Controls,
};
use tracing::{info, warn};

use super::{Console, Resync, connections::populate_toolbar};

/// Toolbar controls for a status report
#[must_use]
pub fn derive_controls(status: &ConnectionStatus) -> Controls {
    if status.is_connected {
        let name = status.connected_db_name.as_deref().unwrap_or_default();
        return Controls {
            connect_label: format!("Disconnect from {name}"),
            connect_enabled: true,
            connect_tone: ButtonTone::Danger,
            run_query_enabled: true,
        };
    }

    match status.connectable_config() {
        Some(name) => Controls {
            connect_label: format!("Connect to {name}"),
            connect_enabled: true,
            connect_tone: ButtonTone::Positive,
            run_query_enabled: false,
        },
        None => Controls::default(),
    }
}

#[must_use]
pub fn status_message(status: &ConnectionStatus) -> String {
    if status.is_connected {
        format!(
            "Connected to: {}",
            status.connected_db_name.as_deref().unwrap_or_default()
        )
    } else {
        format!(
            "Disconnected. Active Config: {}",
            status.active_config_name.as_deref().unwrap_or("None")
        )
    }
}

/// `path (read-only)` of the open database
#[must_use]
pub fn connection_detail(status: &ConnectionStatus) -> Option<String> {
    if !status.is_connected {
        return None;
    }
    let path = status.connected_db_path.as_deref()?;
    let mode = match status.connected_db_read_only {
        Some(true) => "read-only",
        Some(false) => "read-write",
        None => return Some(path.to_string()),
    };
    Some(format!("{path} ({mode})"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    Connect,
    Disconnect,
}

impl<A: ConsoleApi> Console<A> {
    /// Fetch `/api/status` and rederive every status-dependent control
    pub async fn refresh_status(&mut self) {
        match self.api.status().await {
            Ok(status) => self.apply_status(&status),
            Err(err) => self.status_failed(&err),
        }
    }

    fn apply_status(&mut self, status: &ConnectionStatus) {
        self.view.controls = derive_controls(status);
        self.view.status_line = status_message(status);
        self.view.connection_detail = connection_detail(status);
        self.view.toolbar = populate_toolbar(
            &self.connections,
            status.active_config_name.as_deref(),
        );
    }

    fn status_failed(&mut self, err: &ApiError) {
        warn!(%err, "status fetch failed");
        self.view.status_line = "Error fetching status.".to_string();
        self.show(Notice::error(format!(
            "Error fetching status: {}",
            err.status_text()
        )));
    }

    /// Disconnect when connected, connect to the active configuration
    /// otherwise. Reads the status first so a stale toolbar cannot pick
    /// the wrong endpoint.
    pub async fn toggle_connection(&mut self) {
        let status = match self.api.status().await {
            Ok(status) => status,
            Err(err) => {
                self.status_failed(&err);
                return;
            }
        };

        let toggle = if status.is_connected {
            Toggle::Disconnect
        } else if status.connectable_config().is_some() {
            Toggle::Connect
        } else {
            self.show(Notice::warning("No active configuration to connect to."));
            self.view.status_line = "No active configuration.".to_string();
            return;
        };

        info!(?toggle, "toggling connection");
        let reply = match toggle {
            Toggle::Connect => self.api.connect().await,
            Toggle::Disconnect => self.api.disconnect().await,
        };
        let notice = match reply {
            Ok(reply) => Notice::success(
                reply
                    .message
                    .unwrap_or_else(|| "Operation successful.".to_string()),
            ),
            Err(err) if err.is_server() => {
                warn!(%err, ?toggle, "server refused");
                Notice::error(format!(
                    "Error: {}",
                    err.message_or("Operation failed.")
                ))
            }
            Err(err) => {
                warn!(%err, ?toggle, "request failed");
                Notice::error(format!("Network or server error: {err}"))
            }
        };
        self.show(notice);

        self.finish(Resync::Status).await;
    }
}
