use std::future::Future;

use super::error::StoreResult;
use super::model::{DocumentId, DocumentMeta, NewDocument};

/// Persists raw document bytes plus metadata.
///
/// `list` returns documents in a stable order (upload order); comparison
/// results inherit that order.
pub trait DocumentStore: Send + Sync {
    /// Stores a document under a fresh id.
    fn put(&self, document: NewDocument) -> impl Future<Output = StoreResult<DocumentMeta>> + Send;

    /// Returns the metadata for `id`.
    fn metadata(&self, id: &DocumentId) -> impl Future<Output = StoreResult<DocumentMeta>> + Send;

    /// Returns the raw bytes for `id`.
    fn fetch(&self, id: &DocumentId) -> impl Future<Output = StoreResult<Vec<u8>>> + Send;

    /// Removes `id` (bytes and metadata).
    fn delete(&self, id: &DocumentId) -> impl Future<Output = StoreResult<()>> + Send;

    /// Lists every stored document.
    fn list(&self) -> impl Future<Output = StoreResult<Vec<DocumentMeta>>> + Send;

    /// Lists documents whose content type matches `content_type`.
    fn list_eligible(
        &self,
        content_type: &str,
    ) -> impl Future<Output = StoreResult<Vec<DocumentMeta>>> + Send {
        async move {
            Ok(self
                .list()
                .await?
                .into_iter()
                .filter(|meta| meta.is_eligible(content_type))
                .collect())
        }
    }
}
