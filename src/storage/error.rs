use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by [`DocumentStore`](super::DocumentStore) implementations.
pub enum StoreError {
    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Identifier is not a valid document id.
    #[error("invalid document id: {value}")]
    InvalidId { value: String },

    /// Document was not found.
    #[error("document not found: {id}")]
    NotFound { id: String },

    /// Storage root path is missing/unavailable.
    #[error("storage path unavailable: {path}")]
    StorageUnavailable { path: PathBuf },

    /// Backend refused or failed the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns `true` for a missing document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
