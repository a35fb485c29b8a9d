use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::{StoreError, StoreResult};
use super::model::{DocumentId, DocumentMeta, NewDocument};
use super::store::DocumentStore;

#[derive(Default)]
struct MockState {
    // Insertion order is the listing order.
    documents: Vec<(DocumentMeta, Vec<u8>)>,
    failing_fetch: HashSet<DocumentId>,
    fail_delete: bool,
    fail_list: bool,
}

/// In-memory [`DocumentStore`] with fault injection for tests.
#[derive(Default, Clone)]
pub struct MockDocumentStore {
    state: Arc<RwLock<MockState>>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document synchronously and returns its metadata.
    pub fn insert(&self, document: NewDocument) -> DocumentMeta {
        let meta = document.to_meta(DocumentId::new());
        self.state
            .write()
            .documents
            .push((meta.clone(), document.bytes));
        meta
    }

    /// Inserts a `text` document with the given content type.
    pub fn insert_text(&self, filename: &str, content_type: &str, text: &str) -> DocumentMeta {
        self.insert(NewDocument::new(filename, content_type, text.as_bytes()))
    }

    /// Makes every subsequent `fetch` of `id` fail.
    pub fn fail_fetch(&self, id: DocumentId) {
        self.state.write().failing_fetch.insert(id);
    }

    /// Makes every subsequent `delete` fail.
    pub fn fail_delete(&self, fail: bool) {
        self.state.write().fail_delete = fail;
    }

    /// Makes every subsequent `list` fail.
    pub fn fail_list(&self, fail: bool) {
        self.state.write().fail_list = fail;
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.state.read().documents.iter().any(|(m, _)| &m.id == id)
    }

    pub fn len(&self) -> usize {
        self.state.read().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().documents.is_empty()
    }

    fn not_found(id: &DocumentId) -> StoreError {
        StoreError::NotFound { id: id.to_string() }
    }
}

impl DocumentStore for MockDocumentStore {
    async fn put(&self, document: NewDocument) -> StoreResult<DocumentMeta> {
        Ok(self.insert(document))
    }

    async fn metadata(&self, id: &DocumentId) -> StoreResult<DocumentMeta> {
        self.state
            .read()
            .documents
            .iter()
            .find(|(m, _)| &m.id == id)
            .map(|(m, _)| m.clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn fetch(&self, id: &DocumentId) -> StoreResult<Vec<u8>> {
        let state = self.state.read();
        if state.failing_fetch.contains(id) {
            return Err(StoreError::Backend(format!("injected fetch failure for {id}")));
        }
        state
            .documents
            .iter()
            .find(|(m, _)| &m.id == id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        let mut state = self.state.write();
        if state.fail_delete {
            return Err(StoreError::Backend(format!("injected delete failure for {id}")));
        }
        let before = state.documents.len();
        state.documents.retain(|(m, _)| &m.id != id);
        if state.documents.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<DocumentMeta>> {
        let state = self.state.read();
        if state.fail_list {
            return Err(StoreError::Backend("injected list failure".to_string()));
        }
        Ok(state.documents.iter().map(|(m, _)| m.clone()).collect())
    }
}
