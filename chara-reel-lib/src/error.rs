use std::path::PathBuf;

use thiserror::Error;

/// Fatal manifest build failures. Soft-source problems never end up here.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The asset directory could not be listed
    #[error("cannot read asset directory {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serializing the manifest failed
    #[error("cannot serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing or renaming the output file failed
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The HTTP client could not be created
    #[error("{0}")]
    Source(#[from] chara_reel_sources::SourceError),
}

/// Errors from converting a raw sheet export into `videos.csv`.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} is empty", .0.display())]
    EmptyInput(PathBuf),

    #[error("{0}")]
    Csv(#[from] chara_reel_core::CsvError),
}

/// Errors loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Errors that stop the watch loop from starting.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),

    #[error("{0}")]
    Source(#[from] chara_reel_sources::SourceError),
}
