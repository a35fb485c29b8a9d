use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;

/// Opaque document identifier (UUID, hyphenated form on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| StoreError::InvalidId {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Who submitted a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submitter {
    pub team_name: String,
    pub team_leader: String,
    pub team_email: String,
}

/// Stored metadata for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: String,
    pub length: u64,
    /// Hex blake3 digest of the raw bytes.
    pub content_hash: String,
    pub uploaded_at: DateTime<Utc>,
    pub submitter: Submitter,
}

impl DocumentMeta {
    /// Returns `true` if this document takes part in comparisons of `content_type`.
    pub fn is_eligible(&self, content_type: &str) -> bool {
        self.content_type.eq_ignore_ascii_case(content_type)
    }
}

/// A document about to be stored.
#[derive(Debug, Clone, Default)]
pub struct NewDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub submitter: Submitter,
}

impl NewDocument {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
            submitter: Submitter::default(),
        }
    }

    pub fn with_submitter(mut self, submitter: Submitter) -> Self {
        self.submitter = submitter;
        self
    }

    /// Builds the metadata record under `id`, hashing the bytes.
    pub fn to_meta(&self, id: DocumentId) -> DocumentMeta {
        DocumentMeta {
            id,
            filename: self.filename.clone(),
            content_type: self.content_type.clone(),
            length: self.bytes.len() as u64,
            content_hash: blake3::hash(&self.bytes).to_hex().to_string(),
            uploaded_at: Utc::now(),
            submitter: self.submitter.clone(),
        }
    }
}
