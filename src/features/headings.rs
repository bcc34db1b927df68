//! Heading extraction and cleanup.

use crate::dom::{self, Document};

/// Keep headings of at least `min_chars` (after trimming) that contain no
/// blacklisted substring, case-insensitively.
#[must_use]
pub fn clean_headings<S: AsRef<str>>(headings: &[S], blacklist: &[String], min_chars: usize) -> Vec<String> {
    headings
        .iter()
        .map(|h| h.as_ref().trim())
        .filter(|h| h.chars().count() >= min_chars)
        .filter(|h| {
            let lower = h.to_lowercase();
            !blacklist.iter().any(|bad| lower.contains(&bad.to_lowercase()))
        })
        .map(str::to_string)
        .collect()
}

/// Non-empty texts of every `tag` element, in document order.
pub(crate) fn heading_texts(doc: &Document, tag: &str) -> Vec<String> {
    dom::texts_of(doc, tag).into_iter().filter(|t| !t.is_empty()).collect()
}
