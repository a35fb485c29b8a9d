use std::sync::Arc;

use tracing::{debug, warn};

use crate::extract::TextExtractor;
use crate::scoring::CombinedScorer;
use crate::sections::{SectionMap, segment};
use crate::storage::{DocumentId, DocumentMeta, DocumentStore};

use super::error::CorpusItemError;
use super::types::{ComparisonSweep, SectionComparisonResult, SimilarityLabel};

/// Compares a target's sections against every other corpus document.
pub struct CorpusComparator<'a, E> {
    scorer: &'a CombinedScorer,
    extractor: &'a E,
    threshold: f64,
}

impl<'a, E: TextExtractor> CorpusComparator<'a, E> {
    pub fn new(scorer: &'a CombinedScorer, extractor: &'a E, threshold: f64) -> Self {
        Self {
            scorer,
            extractor,
            threshold,
        }
    }

    /// Sweeps `corpus` in order, skipping `target_id` and any document that fails.
    pub async fn sweep<S: DocumentStore>(
        &self,
        store: &S,
        target_id: &DocumentId,
        target: &SectionMap,
        corpus: &[DocumentMeta],
    ) -> ComparisonSweep {
        let mut sweep = ComparisonSweep::default();
        let target = Arc::new(target.clone());

        for other in corpus {
            if &other.id == target_id {
                continue;
            }

            match self.compare_document(store, &other.id, &target).await {
                Ok(rows) => {
                    debug!(document_id = %other.id, rows = rows.len(), "Compared document");
                    for row in rows {
                        sweep.push(row);
                    }
                }
                Err(e) => {
                    warn!(document_id = %other.id, error = %e, "Skipping corpus document");
                    sweep.skipped += 1;
                }
            }
        }

        sweep
    }

    /// All comparable section rows against one document, or nothing on failure.
    ///
    /// Model inference runs on the blocking pool so request workers stay free.
    async fn compare_document<S: DocumentStore>(
        &self,
        store: &S,
        other_id: &DocumentId,
        target: &Arc<SectionMap>,
    ) -> Result<Vec<SectionComparisonResult>, CorpusItemError> {
        let bytes = store.fetch(other_id).await?;
        let other = segment(&self.extractor.extract(&bytes));

        let scorer = self.scorer.clone();
        let target = Arc::clone(target);
        let other_id = *other_id;
        let threshold = self.threshold;

        tokio::task::spawn_blocking(move || {
            score_sections(&scorer, &target, &other, other_id, threshold)
        })
        .await
        .map_err(|e| CorpusItemError::Task(e.to_string()))?
    }
}

fn score_sections(
    scorer: &CombinedScorer,
    target: &SectionMap,
    other: &SectionMap,
    other_id: DocumentId,
    threshold: f64,
) -> Result<Vec<SectionComparisonResult>, CorpusItemError> {
    let mut rows = Vec::new();
    for (section, target_span) in target.iter() {
        let other_span = other.get(section);
        if target_span.trim().is_empty() || other_span.trim().is_empty() {
            continue;
        }

        let score = scorer.score(target_span, other_span)?;
        rows.push(SectionComparisonResult {
            section,
            file_id: other_id,
            similarity_score: score,
            result: SimilarityLabel::classify(score, threshold),
        });
    }

    Ok(rows)
}
