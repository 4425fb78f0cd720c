use thiserror::Error;

use chara_reel_lib::{ManifestError, NormalizeError, SettingsError, WatchError};
use chara_reel_sources::SourceError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be loaded
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Manifest build failed: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Normalize failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Watch failed: {0}")]
    Watch(#[from] WatchError),

    #[error("{0}")]
    Source(#[from] SourceError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
