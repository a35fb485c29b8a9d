use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::detection::PlagiarismDetector;
use crate::embedding::SentenceEncoder;
use crate::storage::DocumentStore;

#[derive(Clone)]
pub struct AppState<S: DocumentStore + Clone + 'static> {
    pub detector: Arc<PlagiarismDetector<S>>,

    pub encoder: Arc<SentenceEncoder>,

    pub storage_path: PathBuf,

    pub cors_origin: String,

    pub max_upload_bytes: usize,
}

impl<S> AppState<S>
where
    S: DocumentStore + Clone + 'static,
{
    pub fn new(store: Arc<S>, encoder: Arc<SentenceEncoder>, config: &Config) -> Self {
        let detector = PlagiarismDetector::new(store, encoder.clone())
            .with_eligible_content_type(config.eligible_content_type.clone())
            .with_threshold(config.threshold);

        Self {
            detector: Arc::new(detector),
            encoder,
            storage_path: config.storage_path.clone(),
            cors_origin: config.cors_origin.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn store(&self) -> &S {
        self.detector.store().as_ref()
    }

    pub fn eligible_content_type(&self) -> &str {
        self.detector.eligible_content_type()
    }
}
