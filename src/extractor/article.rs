//! Readability stage: boilerplate removal with `dom_smoothie`.

use crate::dom::Document;

/// Main article text of `doc`, or `None` when no article could be isolated.
#[cfg(feature = "readability")]
#[must_use]
pub fn article_text(doc: &Document) -> Option<String> {
    use crate::dom::{clone_document, joined_text};
    use dom_smoothie::Readability;

    let mut reader = Readability::with_document(clone_document(doc), None, None).ok()?;
    let article = reader.parse().ok()?;
    let content_doc = Document::from(article.content.to_string());
    let text = joined_text(&content_doc.select("body"));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Without the `readability` feature every page goes to the raw fallback stage.
#[cfg(not(feature = "readability"))]
#[must_use]
pub fn article_text(_doc: &Document) -> Option<String> {
    None
}
