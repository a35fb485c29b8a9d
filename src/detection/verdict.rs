use tracing::{error, info};

use crate::constants::{
    MAX_SIMILARITY_SCORE, VERDICT_CLEAN_MESSAGE, VERDICT_PLAGIARISED_MESSAGE, round_to_hundredths,
};
use crate::storage::{DocumentId, DocumentStore};

use super::types::{ComparisonSweep, Verdict};

/// Reduces a sweep to a verdict and removes flagged targets.
#[derive(Debug, Clone, Copy)]
pub struct VerdictAggregator {
    threshold: f64,
}

impl VerdictAggregator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Mean score rounded to two decimals, `0` for an empty sweep, capped at 100.
    pub fn average(&self, sweep: &ComparisonSweep) -> f64 {
        if sweep.count == 0 {
            return 0.0;
        }
        round_to_hundredths(sweep.total / sweep.count as f64).min(MAX_SIMILARITY_SCORE)
    }

    pub fn is_plagiarised(&self, average: f64) -> bool {
        average >= self.threshold
    }

    /// Builds the verdict, deleting `target_id` when flagged.
    ///
    /// A failed delete is logged and reported through [`Verdict::deleted`];
    /// the flag and message stay as computed.
    pub async fn conclude<S: DocumentStore>(
        &self,
        store: &S,
        target_id: &DocumentId,
        sweep: ComparisonSweep,
    ) -> Verdict {
        let average = self.average(&sweep);
        let plagiarised = self.is_plagiarised(average);

        let deleted = if plagiarised {
            match store.delete(target_id).await {
                Ok(()) => true,
                Err(e) => {
                    error!(document_id = %target_id, error = %e, "Failed to delete plagiarised document");
                    false
                }
            }
        } else {
            false
        };

        info!(
            document_id = %target_id,
            average,
            comparisons = sweep.count,
            skipped = sweep.skipped,
            plagiarised,
            deleted,
            "Verdict reached"
        );

        Verdict {
            avg_similarity_score: average,
            plagiarised,
            detailed_results: sweep.results,
            message: if plagiarised {
                VERDICT_PLAGIARISED_MESSAGE
            } else {
                VERDICT_CLEAN_MESSAGE
            }
            .to_string(),
            deleted,
        }
    }
}
