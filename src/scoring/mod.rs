//! Span-pair similarity.
//!
//! [`lexical_similarity`] is a pure TF-IDF cosine fit fresh on each pair.
//! [`SemanticScorer`] compares sentence embeddings from the shared encoder.
//! [`CombinedScorer`] averages the two and reports a percentage rounded to
//! two decimals, which is the score every comparison row carries.

pub mod combined;
pub mod error;
pub mod lexical;
pub mod semantic;


pub use combined::{CombinedScorer, ScoreBreakdown};
pub use error::ScoringError;
pub use lexical::lexical_similarity;
pub use semantic::{SemanticScorer, cosine_similarity};
