//! Header-based section segmentation.
//!
//! A document is split into the fixed [`SECTION_HEADERS`] set. Matching is a
//! heuristic: a header counts when it is followed by `:` or a newline, and a
//! section ends where the *next* header in list order first appears after the
//! section's start. Headers that repeat or appear out of order can therefore
//! skip or shift text; callers compare whatever spans come out.


use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::SECTION_HEADERS;

/// One of the fixed logical sections of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Abstract,
    Introduction,
    Requirements,
    Methodology,
    Implementation,
    Results,
    Conclusion,
}

impl Section {
    /// All sections in header order.
    pub const ALL: [Section; 7] = [
        Section::Abstract,
        Section::Introduction,
        Section::Requirements,
        Section::Methodology,
        Section::Implementation,
        Section::Results,
        Section::Conclusion,
    ];

    /// Lower-case header text.
    pub fn as_str(&self) -> &'static str {
        SECTION_HEADERS[self.index()]
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// The section that follows this one in header order.
    pub fn next(&self) -> Option<Section> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static HEADER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SECTION_HEADERS
        .iter()
        .map(|header| {
            Regex::new(&format!("{}[:\n]", regex::escape(header)))
                .expect("section header pattern is a valid regex")
        })
        .collect()
});

/// Text span per section; every section is present, unmatched ones are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    spans: [String; 7],
}

impl SectionMap {
    /// Returns the trimmed span for `section` (possibly empty).
    pub fn get(&self, section: Section) -> &str {
        &self.spans[section.index()]
    }

    /// Iterates `(section, span)` in header order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        Section::ALL
            .iter()
            .map(move |section| (*section, self.get(*section)))
    }

    /// Sections whose span is non-empty.
    pub fn populated(&self) -> impl Iterator<Item = Section> + '_ {
        self.iter()
            .filter(|(_, span)| !span.is_empty())
            .map(|(section, _)| section)
    }

    /// Returns `true` when no section matched.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(String::is_empty)
    }
}

/// Splits `text` into sections.
///
/// Matching runs on a lower-cased copy, so returned spans are lower-case.
pub fn segment(text: &str) -> SectionMap {
    let text = text.to_lowercase();
    let mut map = SectionMap::default();

    for section in Section::ALL {
        let Some(header) = HEADER_PATTERNS[section.index()].find(&text) else {
            continue;
        };

        let start = header.end();
        let remainder = &text[start..];
        let end = section
            .next()
            .and_then(|next| HEADER_PATTERNS[next.index()].find(remainder))
            .map(|next_header| start + next_header.start())
            .unwrap_or(text.len());

        map.spans[section.index()] = text[start..end].trim().to_string();
    }

    map
}
