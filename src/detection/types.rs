use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_SIMILARITY_LABEL, LOW_SIMILARITY_LABEL};
use crate::sections::Section;
use crate::storage::DocumentId;

/// Per-row classification of a section score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityLabel {
    #[serde(rename = "High similarity")]
    High,
    #[serde(rename = "Low similarity")]
    Low,
}

impl SimilarityLabel {
    /// `High` iff `score >= threshold`.
    pub fn classify(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            SimilarityLabel::High
        } else {
            SimilarityLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityLabel::High => HIGH_SIMILARITY_LABEL,
            SimilarityLabel::Low => LOW_SIMILARITY_LABEL,
        }
    }
}

/// One comparable section pair between the target and another document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionComparisonResult {
    pub section: Section,
    #[serde(rename = "fileId")]
    pub file_id: DocumentId,
    /// Combined score in percent, two decimals.
    pub similarity_score: f64,
    pub result: SimilarityLabel,
}

/// Everything one sweep over the corpus produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSweep {
    /// Rows in corpus order, then section order.
    pub results: Vec<SectionComparisonResult>,
    pub total: f64,
    pub count: usize,
    /// Corpus documents dropped because they could not be read or scored.
    pub skipped: usize,
}

impl ComparisonSweep {
    pub fn push(&mut self, row: SectionComparisonResult) {
        self.total += row.similarity_score;
        self.count += 1;
        self.results.push(row);
    }
}

/// Final outcome of a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub avg_similarity_score: f64,
    pub plagiarised: bool,
    #[serde(rename = "detailedResults")]
    pub detailed_results: Vec<SectionComparisonResult>,
    pub message: String,
    /// Whether the flagged target was actually removed from the store.
    pub deleted: bool,
}
