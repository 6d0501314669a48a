use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A saved connection configuration. The name is the unique key.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub read_only: bool,
}

/// Server-reported connection status.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default)]
    pub connected_db_name: Option<String>,
    #[serde(default)]
    pub connected_db_path: Option<String>,
    #[serde(default)]
    pub connected_db_read_only: Option<bool>,
    #[serde(default)]
    pub active_config_name: Option<String>,
    #[serde(default)]
    pub active_config_details: Option<ConnectionConfig>,
}

impl ConnectionStatus {
    /// Name of the active configuration, if the server also knows its
    /// details. Only such a configuration can be connected to.
    #[must_use]
    pub fn connectable_config(&self) -> Option<&str> {
        self.active_config_details
            .as_ref()
            .and(self.active_config_name.as_deref())
    }
}

/// Body of `GET /api/connections`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionList {
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
    #[serde(default)]
    pub active_connection_name: Option<String>,
}

/// One row of a tabular result, keyed by column name.
pub type ResultRow = Map<String, Value>;

/// Result of `POST /api/query`, discriminated by `data_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "data_type", rename_all = "lowercase")]
pub enum QueryResult {
    Error {
        #[serde(default)]
        error: String,
    },
    Message {
        #[serde(default)]
        message: String,
        #[serde(default)]
        rows_affected: Option<i64>,
    },
    Table {
        #[serde(default)]
        columns: Vec<String>,
        #[serde(default)]
        data: Vec<ResultRow>,
        #[serde(default)]
        rows_affected: Option<i64>,
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// Body of `POST /api/connections/save`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveConnectionRequest {
    pub name: String,
    pub path: String,
    pub read_only: bool,
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_create: Option<bool>,
}

impl SaveConnectionRequest {
    /// The same request, acknowledging that the server may create the
    /// database file.
    #[must_use]
    pub fn confirmed(&self) -> Self {
        Self {
            confirm_create: Some(true),
            ..self.clone()
        }
    }
}

/// Successful reply to a save request.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub requires_confirmation: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{message}` reply used by connect, disconnect and delete.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `{error}` body carried by non-2xx replies.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryBody<'a> {
    pub query: &'a str,
}
