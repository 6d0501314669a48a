use std::fmt;

/// Application-specific errors
#[derive(Debug)]
pub enum DucklingError {
    /// Input rejected before any request was made
    Validation(String),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for DucklingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for DucklingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for DucklingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, DucklingError>;
