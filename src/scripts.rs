use std::path::Path;

use tracing::info;

use crate::errors::{DucklingError, Result};

/// Default name offered when saving a script
pub const DEFAULT_SCRIPT_NAME: &str = "query.sql";

/// Read a SQL script as text
pub async fn load(path: &Path) -> Result<String> {
    let text = tokio::fs::read_to_string(path).await?;
    info!(path = %path.display(), bytes = text.len(), "script loaded");
    Ok(text)
}

/// Write the editor contents to `path`, replacing any existing file
pub async fn save(path: &Path, text: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(DucklingError::Validation(
            "No file name given.".to_string(),
        ));
    }
    tokio::fs::write(path, text).await?;
    info!(path = %path.display(), bytes = text.len(), "script saved");
    Ok(())
}

/// File name shown in messages
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
