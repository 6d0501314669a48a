use duckling_api::{ConnectionConfig, ConsoleApi};
use duckling_ui::widgets::{
    results::Notice,
    select::{SelectOption, Selector},
};
use tracing::{info, warn};

use super::{Console, Resync};

pub const NO_CONFIGURATIONS: &str = "No configurations";

/// Toolbar selector: the active configuration when it is listed, else the
/// first entry. An empty list shows a disabled placeholder.
#[must_use]
pub fn populate_toolbar(
    connections: &[ConnectionConfig],
    active: Option<&str>,
) -> Selector {
    if connections.is_empty() {
        return Selector::new(
            vec![SelectOption::placeholder(NO_CONFIGURATIONS)],
            Some(0),
        );
    }
    let options = options(connections);
    let selected = active
        .and_then(|name| connections.iter().position(|c| c.name == name))
        .unwrap_or(0);
    Selector::new(options, Some(selected))
}

/// Modal list: keeps the previously highlighted name, if it still exists
#[must_use]
pub fn populate_modal_list(
    connections: &[ConnectionConfig],
    previous: Option<&str>,
) -> Selector {
    let selected = previous
        .and_then(|name| connections.iter().position(|c| c.name == name));
    Selector::new(options(connections), selected)
}

fn options(connections: &[ConnectionConfig]) -> Vec<SelectOption> {
    connections
        .iter()
        .map(|config| SelectOption::new(config.name.as_str()))
        .collect()
}

impl<A: ConsoleApi> Console<A> {
    /// Replace the cached list, rebuild both selectors, then refresh
    /// status
    pub async fn refresh_connections(&mut self) {
        let list = match self.api.connections().await {
            Ok(list) => list,
            Err(err) => {
                warn!(%err, "connection list fetch failed");
                self.show(Notice::error(format!(
                    "Error fetching connections list: {}",
                    err.status_text()
                )));
                return;
            }
        };

        self.connections = list.connections;
        self.view.toolbar = populate_toolbar(
            &self.connections,
            list.active_connection_name.as_deref(),
        );
        let previous = self.view.modal_list.value().map(str::to_string);
        self.view.modal_list =
            populate_modal_list(&self.connections, previous.as_deref());

        self.refresh_status().await;
    }

    /// Move the toolbar selection one entry and make it the active
    /// configuration
    pub async fn cycle_active(&mut self, forward: bool) {
        let before = self.view.toolbar.value().map(str::to_string);
        if forward {
            self.view.toolbar.select_next();
        } else {
            self.view.toolbar.select_previous();
        }
        let after = self.view.toolbar.value().map(str::to_string);
        if after == before {
            return;
        }
        if let Some(name) = after {
            self.switch_active(&name).await;
        }
    }

    /// `POST /api/connections/set-active`; status is refreshed whatever
    /// the outcome
    pub async fn switch_active(&mut self, name: &str) {
        if name.is_empty() || name == NO_CONFIGURATIONS {
            return;
        }
        info!(name, "setting active configuration");
        if let Err(err) = self.api.set_active(name).await {
            warn!(%err, name, "set-active failed");
            self.show(Notice::error(format!(
                "Error setting active config: {err}"
            )));
        }
        self.finish(Resync::Status).await;
    }
}
