//! Plagiarism detection over the document store.
//!
//! [`PlagiarismDetector`] validates the target, then [`CorpusComparator`]
//! scores every comparable section pair against the rest of the eligible
//! corpus, and [`VerdictAggregator`] averages the rows into a [`Verdict`],
//! deleting the target when it is flagged.

pub mod comparator;
pub mod detector;
pub mod error;
pub mod types;
pub mod verdict;

#[cfg(test)]
mod tests;

pub use comparator::CorpusComparator;
pub use detector::PlagiarismDetector;
pub use error::{CorpusItemError, DetectionError};
pub use types::{ComparisonSweep, SectionComparisonResult, SimilarityLabel, Verdict};
pub use verdict::VerdictAggregator;
