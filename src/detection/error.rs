use thiserror::Error;

use crate::scoring::ScoringError;
use crate::storage::StoreError;

/// Errors surfaced by [`PlagiarismDetector`](super::PlagiarismDetector).
#[derive(Error, Debug)]
pub enum DetectionError {
    /// Identifier is malformed; nothing was read.
    #[error("Invalid file ID: {value}")]
    InvalidIdentifier { value: String },

    /// Target is missing or not of the eligible content type.
    #[error("File not found or not eligible: {id}")]
    NotFound { id: String },

    /// Any other internal fault.
    #[error("{0}")]
    Unexpected(String),
}

impl DetectionError {
    /// Short machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DetectionError::InvalidIdentifier { .. } => "invalid_identifier",
            DetectionError::NotFound { .. } => "not_found",
            DetectionError::Unexpected(_) => "unexpected",
        }
    }

    /// Maps a store failure on the target document.
    pub(crate) fn from_target_store(id: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => DetectionError::NotFound { id: id.to_string() },
            StoreError::InvalidId { value } => DetectionError::InvalidIdentifier { value },
            other => DetectionError::Unexpected(other.to_string()),
        }
    }
}

/// Failure while comparing against one corpus document. Never leaves the sweep.
#[derive(Error, Debug)]
pub enum CorpusItemError {
    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("scoring: {0}")]
    Scoring(#[from] ScoringError),

    #[error("scoring task failed: {0}")]
    Task(String),
}
