use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures the book store can report. Only `NotFound` is meant to be shown to
/// the user and recovered from; the rest are disk problems that end the
/// session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no book titled `{0}`")]
    NotFound(String),
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode book list")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
