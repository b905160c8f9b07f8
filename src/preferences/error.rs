//! Preference storage errors.

use std::path::PathBuf;

/// Errors that can occur while reading or writing stored preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Could not determine a data directory for preferences")]
    NoDataDir,

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Rejected speed input. The caller re-prompts; nothing is stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeedError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("speed must be greater than zero, got '{0}'")]
    NotPositive(String),
}
