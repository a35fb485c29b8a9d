//! Sentence embedding for semantic similarity.
//!
//! - [`encoder`] provides the load-once [`SentenceEncoder`] shared by all requests.
//! - [`bert`] wraps the candle BERT model with mean pooling.

/// BERT sentence model wrapper used by the encoder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder (model or stub backend).
pub mod encoder;
mod error;
/// Tokenizer loading helpers.
pub mod utils;

pub use encoder::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig, SentenceEncoder};
pub use error::EmbeddingError;
