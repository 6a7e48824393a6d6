use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteStoreError {
    #[error("Note with id {0} not found")]
    NotFound(String),

    #[error("Notes store not initialized")]
    NotInitialized,

    #[error("Failed to access {}: {}", .path.display(), .source)]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NoteStoreError {
    pub fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteStoreError>;
