use thiserror::Error;

/// Failures talking to the console server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, refused).
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{}", server_message(.status, .message))]
    Server { status: u16, message: Option<String> },

    /// A 2xx response whose body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

fn server_message(status: &u16, message: &Option<String>) -> String {
    message
        .clone()
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

impl ApiError {
    /// The `{error}` text the server supplied, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Decode(_) | Self::Url(_) => None,
        }
    }

    /// Whether the server replied at all.
    #[must_use]
    pub const fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Describes the failure by HTTP status alone, ignoring any `{error}`
    /// body. Used for the read-only fetches.
    #[must_use]
    pub fn status_text(&self) -> String {
        match self {
            Self::Server { status, .. } => format!("HTTP error! status: {status}"),
            Self::Network(_) | Self::Decode(_) | Self::Url(_) => {
                self.to_string()
            }
        }
    }

    /// The server's message, or `fallback` when a non-2xx reply carried
    /// none. Transport and decode failures describe themselves.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Server { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_string())
            }
            Self::Network(_) | Self::Decode(_) | Self::Url(_) => {
                self.to_string()
            }
        }
    }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
