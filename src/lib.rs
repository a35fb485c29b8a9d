//! plagcheck library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Detection
//! - [`PlagiarismDetector`] - checks one stored document against the corpus
//! - [`Verdict`], [`SectionComparisonResult`] - check outcome and its rows
//! - [`DetectionError`] - invalid id / not found / unexpected
//!
//! ## Text & Scoring
//! - [`segment`], [`Section`], [`SectionMap`] - header-based section split
//! - [`lexical_similarity`] - TF-IDF cosine of two spans
//! - [`SentenceEncoder`], [`SemanticScorer`] - embedding similarity
//! - [`CombinedScorer`] - blended percentage
//!
//! ## Storage
//! - [`DocumentStore`] - storage port, [`FsDocumentStore`] - filesystem backend
//! - [`TextExtractor`], [`Utf8TextExtractor`] - bytes to text
//!
//! ## Server
//! - [`Config`] - environment configuration
//! - [`gateway`] - Axum router and handlers
//!
//! ## Test/Mock Support
//! [`MockDocumentStore`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod detection;
pub mod embedding;
pub mod extract;
pub mod gateway;
pub mod scoring;
pub mod sections;
pub mod storage;

pub use config::{Config, ConfigError};
pub use detection::{
    ComparisonSweep, CorpusComparator, DetectionError, PlagiarismDetector,
    SectionComparisonResult, SimilarityLabel, Verdict, VerdictAggregator,
};
pub use embedding::{EmbeddingError, EncoderConfig, SentenceEncoder};
pub use extract::{TextExtractor, Utf8TextExtractor};
pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use scoring::{
    CombinedScorer, ScoreBreakdown, ScoringError, SemanticScorer, cosine_similarity,
    lexical_similarity,
};
pub use sections::{Section, SectionMap, segment};
#[cfg(any(test, feature = "mock"))]
pub use storage::MockDocumentStore;
pub use storage::{
    DocumentId, DocumentMeta, DocumentStore, FsDocumentStore, NewDocument, StoreError,
    StoreResult, Submitter,
};
