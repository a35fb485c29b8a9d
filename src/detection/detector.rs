use std::sync::Arc;

use tracing::{debug, instrument};

use crate::constants::{DEFAULT_ELIGIBLE_CONTENT_TYPE, DEFAULT_PLAGIARISM_THRESHOLD};
use crate::embedding::SentenceEncoder;
use crate::extract::{TextExtractor, Utf8TextExtractor};
use crate::scoring::CombinedScorer;
use crate::sections::segment;
use crate::storage::{DocumentId, DocumentMeta, DocumentStore};

use super::comparator::CorpusComparator;
use super::error::DetectionError;
use super::types::Verdict;
use super::verdict::VerdictAggregator;

/// Checks one stored document against the rest of the eligible corpus.
pub struct PlagiarismDetector<S, E = Utf8TextExtractor> {
    store: Arc<S>,
    scorer: CombinedScorer,
    extractor: E,
    eligible_content_type: String,
    threshold: f64,
}

impl<S: DocumentStore> PlagiarismDetector<S, Utf8TextExtractor> {
    /// Detector with the UTF-8 extractor and default threshold/content type.
    pub fn new(store: Arc<S>, encoder: Arc<SentenceEncoder>) -> Self {
        Self::with_extractor(store, encoder, Utf8TextExtractor)
    }
}

impl<S: DocumentStore, E: TextExtractor> PlagiarismDetector<S, E> {
    pub fn with_extractor(store: Arc<S>, encoder: Arc<SentenceEncoder>, extractor: E) -> Self {
        Self {
            store,
            scorer: CombinedScorer::new(encoder),
            extractor,
            eligible_content_type: DEFAULT_ELIGIBLE_CONTENT_TYPE.to_string(),
            threshold: DEFAULT_PLAGIARISM_THRESHOLD,
        }
    }

    pub fn with_eligible_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.eligible_content_type = content_type.into();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn eligible_content_type(&self) -> &str {
        &self.eligible_content_type
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Parses `raw_id` and runs [`check_id`](Self::check_id).
    pub async fn check(&self, raw_id: &str) -> Result<Verdict, DetectionError> {
        let id = raw_id
            .parse::<DocumentId>()
            .map_err(|_| DetectionError::InvalidIdentifier {
                value: raw_id.to_string(),
            })?;
        self.check_id(&id).await
    }

    /// Full check of `id`: load, sweep the corpus, aggregate, delete if flagged.
    #[instrument(skip(self, id), fields(document_id = %id))]
    pub async fn check_id(&self, id: &DocumentId) -> Result<Verdict, DetectionError> {
        self.eligible_target(id).await?;

        let bytes = self
            .store
            .fetch(id)
            .await
            .map_err(|e| DetectionError::from_target_store(&id.to_string(), e))?;
        let target = segment(&self.extractor.extract(&bytes));
        debug!(sections = target.populated().count(), "Segmented target");

        let corpus = self
            .store
            .list_eligible(&self.eligible_content_type)
            .await
            .map_err(|e| DetectionError::Unexpected(e.to_string()))?;

        let sweep = CorpusComparator::new(&self.scorer, &self.extractor, self.threshold)
            .sweep(self.store.as_ref(), id, &target, &corpus)
            .await;

        Ok(VerdictAggregator::new(self.threshold)
            .conclude(self.store.as_ref(), id, sweep)
            .await)
    }

    /// Ids of other eligible documents whose bytes hash identically to `id`.
    pub async fn find_duplicates(&self, id: &DocumentId) -> Result<Vec<DocumentId>, DetectionError> {
        let target = self.eligible_target(id).await?;

        let corpus = self
            .store
            .list_eligible(&self.eligible_content_type)
            .await
            .map_err(|e| DetectionError::Unexpected(e.to_string()))?;

        Ok(corpus
            .into_iter()
            .filter(|meta| meta.id != target.id && meta.content_hash == target.content_hash)
            .map(|meta| meta.id)
            .collect())
    }

    async fn eligible_target(&self, id: &DocumentId) -> Result<DocumentMeta, DetectionError> {
        let meta = self
            .store
            .metadata(id)
            .await
            .map_err(|e| DetectionError::from_target_store(&id.to_string(), e))?;

        if !meta.is_eligible(&self.eligible_content_type) {
            return Err(DetectionError::NotFound { id: id.to_string() });
        }
        Ok(meta)
    }
}
