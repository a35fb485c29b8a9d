//! Filesystem-backed document store (one blob plus one JSON sidecar per document).

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::error::{StoreError, StoreResult};
use super::model::{DocumentId, DocumentMeta, NewDocument};
use super::store::DocumentStore;

const BLOB_EXTENSION: &str = "bin";

const META_EXTENSION: &str = "json";

const TEMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone)]
/// Stores documents as files under a root directory.
pub struct FsDocumentStore {
    storage_path: PathBuf,
}

impl FsDocumentStore {
    /// Creates a store rooted at `storage_path`.
    pub fn new(storage_path: PathBuf) -> Self {
        Self { storage_path }
    }

    /// Returns the root storage directory.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Ensures the root storage directory exists.
    pub async fn ensure_storage_path(&self) -> StoreResult<()> {
        if fs::metadata(&self.storage_path).await.is_err() {
            fs::create_dir_all(&self.storage_path)
                .await
                .map_err(|_| StoreError::StorageUnavailable {
                    path: self.storage_path.clone(),
                })?;
        }
        Ok(())
    }

    fn blob_path(&self, id: &DocumentId) -> PathBuf {
        self.storage_path.join(format!("{}.{}", id, BLOB_EXTENSION))
    }

    fn meta_path(&self, id: &DocumentId) -> PathBuf {
        self.storage_path.join(format!("{}.{}", id, META_EXTENSION))
    }

    async fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let mut temp = path.as_os_str().to_owned();
        temp.push(".");
        temp.push(TEMP_SUFFIX);
        let temp_path = PathBuf::from(temp);

        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
        }

        fs::rename(&temp_path, path).await?;
        Ok(())
    }

    async fn read_meta(&self, path: &Path) -> StoreResult<DocumentMeta> {
        let raw = fs::read(path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    fn not_found(id: &DocumentId) -> StoreError {
        StoreError::NotFound { id: id.to_string() }
    }
}

impl DocumentStore for FsDocumentStore {
    async fn put(&self, document: NewDocument) -> StoreResult<DocumentMeta> {
        self.ensure_storage_path().await?;

        let id = DocumentId::new();
        let meta = document.to_meta(id);

        // Blob first: a sidecar is only visible once its bytes exist.
        Self::write_atomic(&self.blob_path(&id), &document.bytes).await?;
        let encoded = serde_json::to_vec_pretty(&meta)?;
        Self::write_atomic(&self.meta_path(&id), &encoded).await?;

        debug!(document_id = %id, bytes = meta.length, "Stored document");
        Ok(meta)
    }

    async fn metadata(&self, id: &DocumentId) -> StoreResult<DocumentMeta> {
        let path = self.meta_path(id);
        if fs::metadata(&path).await.is_err() {
            return Err(Self::not_found(id));
        }
        self.read_meta(&path).await
    }

    async fn fetch(&self, id: &DocumentId) -> StoreResult<Vec<u8>> {
        let path = self.blob_path(id);
        if fs::metadata(&path).await.is_err() || fs::metadata(self.meta_path(id)).await.is_err() {
            return Err(Self::not_found(id));
        }
        Ok(fs::read(&path).await?)
    }

    async fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        let meta_path = self.meta_path(id);
        if fs::metadata(&meta_path).await.is_err() {
            return Err(Self::not_found(id));
        }

        fs::remove_file(&meta_path).await?;
        match fs::remove_file(self.blob_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        debug!(document_id = %id, "Deleted document");
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<DocumentMeta>> {
        if fs::metadata(&self.storage_path).await.is_err() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        let mut dir = fs::read_dir(&self.storage_path).await?;

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();

            if let Some(ext) = path.extension()
                && ext == META_EXTENSION
                && let Some(stem) = path.file_stem()
                && let Some(stem_str) = stem.to_str()
                && stem_str.parse::<DocumentId>().is_ok()
            {
                // A sidecar can vanish under a concurrent delete or be unreadable; drop only that entry.
                match self.read_meta(&path).await {
                    Ok(meta) => documents.push(meta),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable document metadata");
                    }
                }
            }
        }

        documents.sort_by(|a, b| {
            a.uploaded_at
                .cmp(&b.uploaded_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(documents)
    }
}
