use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the release check and the update dialog
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("{0}")]
    Transfer(String),

    #[error(
        "Could not store to file:\n{}\n\n{}\n\nIs your temporary path writable?",
        .location.display(),
        .source
    )]
    Storage {
        location: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Release manifest error: {0}")]
    Manifest(String),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl UpdateError {
    /// Heading for the blocking error notice
    pub fn title(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "Download error",
            Self::Storage { .. } => "Could not store to file",
            Self::Manifest(_) => "Update check failed",
            Self::Runtime(_) => "Runtime error",
        }
    }
}

impl From<reqwest::Error> for UpdateError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transfer(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UpdateError>;
