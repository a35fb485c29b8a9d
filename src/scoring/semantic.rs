use std::sync::Arc;

use tracing::debug;

use crate::embedding::SentenceEncoder;

use super::error::ScoringError;

/// Embedding cosine similarity backed by the shared [`SentenceEncoder`].
#[derive(Debug, Clone)]
pub struct SemanticScorer {
    encoder: Arc<SentenceEncoder>,
}

impl SemanticScorer {
    pub fn new(encoder: Arc<SentenceEncoder>) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &SentenceEncoder {
        &self.encoder
    }

    /// Cosine similarity of the two span embeddings, clamped to `[0, 1]`.
    pub fn score(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        let embeddings = self.encoder.encode_batch(&[a, b])?;
        let [ea, eb] = embeddings.as_slice() else {
            return Err(ScoringError::ComputationFailed {
                reason: format!("expected 2 embeddings, got {}", embeddings.len()),
            });
        };

        let cosine = cosine_similarity(ea, eb);
        debug!(cosine, "Semantic similarity computed");

        Ok(f64::from(cosine).clamp(0.0, 1.0))
    }
}

/// Cosine similarity; `0.0` on length mismatch, empty input or a zero vector.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (av, bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
