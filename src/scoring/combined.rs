use std::sync::Arc;

use tracing::debug;

use crate::constants::round_to_hundredths;
use crate::embedding::SentenceEncoder;

use super::error::ScoringError;
use super::lexical::lexical_similarity;
use super::semantic::SemanticScorer;

/// Lexical and semantic scores of one span pair, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub lexical: f64,
    pub semantic: f64,
}

impl ScoreBreakdown {
    /// Mean of both scores as a percentage rounded to two decimals.
    pub fn combined(&self) -> f64 {
        round_to_hundredths((self.lexical + self.semantic) / 2.0 * 100.0)
    }
}

/// Blends TF-IDF and embedding similarity into one percentage.
#[derive(Debug, Clone)]
pub struct CombinedScorer {
    semantic: SemanticScorer,
}

impl CombinedScorer {
    pub fn new(encoder: Arc<SentenceEncoder>) -> Self {
        Self {
            semantic: SemanticScorer::new(encoder),
        }
    }

    pub fn semantic(&self) -> &SemanticScorer {
        &self.semantic
    }

    /// Both component scores for `a` and `b`.
    pub fn breakdown(&self, a: &str, b: &str) -> Result<ScoreBreakdown, ScoringError> {
        if a.trim().is_empty() || b.trim().is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "both spans must be non-empty".to_string(),
            });
        }

        let lexical = lexical_similarity(a, b);
        let semantic = self.semantic.score(a, b)?;

        debug!(
            a_len = a.len(),
            b_len = b.len(),
            lexical,
            semantic,
            "Scored span pair"
        );

        Ok(ScoreBreakdown { lexical, semantic })
    }

    /// Combined similarity percentage in `[0, 100]`, two-decimal precision.
    pub fn score(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        Ok(self.breakdown(a, b)?.combined())
    }
}
