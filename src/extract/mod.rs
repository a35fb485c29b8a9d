//! Raw bytes to plain text.


/// Turns stored document bytes into text for segmentation.
///
/// Extraction never fails: unreadable input yields whatever text could be
/// recovered, possibly an empty string.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> String;
}

/// Lossy UTF-8 decoding with NUL bytes and a leading BOM removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8TextExtractor;

impl Utf8TextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for Utf8TextExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        text.chars().filter(|c| *c != '\0').collect()
    }
}
