//! Error handling for VidSaver

use thiserror::Error;

/// Main error type for VidSaver
#[derive(Debug, Error)]
pub enum VidsaverError {
    #[error("Failed to fetch video metadata: {0}")]
    MetadataFetch(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Failed to save file: {0}")]
    Save(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid format selection: {0}")]
    InvalidSelection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, VidsaverError>;

impl VidsaverError {
    /// Message without the kind prefix, as shown to the user
    pub fn message(&self) -> String {
        match self {
            VidsaverError::MetadataFetch(msg)
            | VidsaverError::Download(msg)
            | VidsaverError::Save(msg)
            | VidsaverError::InvalidState(msg)
            | VidsaverError::InvalidSelection(msg)
            | VidsaverError::Config(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
