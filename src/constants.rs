//! Cross-cutting, shared constants.
//!
//! The section header list is an ordering invariant: it drives both segmentation
//! boundaries and the order in which section pairs are compared.

/// Section headers in document order.
pub const SECTION_HEADERS: [&str; 7] = [
    "abstract",
    "introduction",
    "requirements",
    "methodology",
    "implementation",
    "results",
    "conclusion",
];

/// Score (percent) at or above which a comparison or a verdict counts as plagiarism.
pub const DEFAULT_PLAGIARISM_THRESHOLD: f64 = 80.0;

/// Upper bound of any similarity percentage.
pub const MAX_SIMILARITY_SCORE: f64 = 100.0;

pub const HIGH_SIMILARITY_LABEL: &str = "High similarity";
pub const LOW_SIMILARITY_LABEL: &str = "Low similarity";

pub const VERDICT_PLAGIARISED_MESSAGE: &str = "File plagiarised and deleted";
pub const VERDICT_CLEAN_MESSAGE: &str = "No significant plagiarism";

/// Output dimension of the default sentence encoder (MiniLM-L6).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the sentence encoder per span.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Content type a document must carry to take part in comparisons.
pub const DEFAULT_ELIGIBLE_CONTENT_TYPE: &str = "text/plain";

/// Default upload body limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Response header carrying a short machine-readable outcome.
pub const PLAGCHECK_STATUS_HEADER: &str = "x-plagcheck-status";
pub const PLAGCHECK_STATUS_HEALTHY: &str = "healthy";
pub const PLAGCHECK_STATUS_READY: &str = "ready";
pub const PLAGCHECK_STATUS_ERROR: &str = "error";
pub const PLAGCHECK_STATUS_PLAGIARISED: &str = "plagiarised";
pub const PLAGCHECK_STATUS_CLEAN: &str = "clean";

/// Rounds a percentage to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
