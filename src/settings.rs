use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use url::Url;

use crate::errors::{DucklingError, Result};

const LOG_FILE_NAME: &str = "duckling.log";

/// Terminal console for a Duckling database server
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Settings {
    /// Base URL of the console server
    #[arg(
        long,
        env = "DUCKLING_SERVER",
        default_value = "http://127.0.0.1:5001"
    )]
    pub server: Url,

    /// Where to write the log; defaults to the platform data directory
    #[arg(long, env = "DUCKLING_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Reject server URLs reqwest cannot talk to
    pub fn validate(&self) -> Result<()> {
        match self.server.scheme() {
            "http" | "https" => Ok(()),
            other => Err(DucklingError::Validation(format!(
                "unsupported server scheme '{other}', expected http or https"
            ))),
        }
    }

    /// Log file path: `--log-file`, else `duckling.log` in the platform's
    /// local data directory, else the working directory
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            ProjectDirs::from("", "", "duckling").map_or_else(
                || PathBuf::from(LOG_FILE_NAME),
                |dirs| dirs.data_local_dir().join(LOG_FILE_NAME),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["duckling"]).unwrap();
        assert_eq!(settings.server.as_str(), "http://127.0.0.1:5001/");
        assert!(settings.validate().is_ok());
        assert!(settings.log_path().ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn test_explicit_arguments() {
        let settings = Settings::try_parse_from([
            "duckling",
            "--server",
            "https://db.example.com/console",
            "--log-file",
            "/tmp/d.log",
        ])
        .unwrap();
        assert_eq!(settings.server.path(), "/console");
        assert_eq!(settings.log_path(), PathBuf::from("/tmp/d.log"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        let settings =
            Settings::try_parse_from(["duckling", "--server", "ftp://host"])
                .unwrap();
        assert!(matches!(
            settings.validate(),
            Err(DucklingError::Validation(_))
        ));
        assert!(
            Settings::try_parse_from(["duckling", "--server", "not a url"])
                .is_err()
        );
    }
}
