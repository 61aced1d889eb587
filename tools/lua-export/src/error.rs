//! Error types

use std::path::PathBuf;
use thiserror::Error;

use scene_model::ModelError;

/// Failure while exporting one scene
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Scene failed validation: {0}")]
    InvalidScene(#[from] ModelError),

    #[error("Failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while loading an export config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
