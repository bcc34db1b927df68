//! Page-level metadata: description, publication date, table of contents.

use chrono::{DateTime, NaiveDate};

use crate::dom::{self, get_attribute, Document, Selection};
use crate::patterns::TOC_CLASS;

/// `<meta name="description">` content, or `fallback` when absent.
#[must_use]
pub fn meta_description(doc: &Document, fallback: &str) -> String {
    dom::meta_content(doc, "name", "description").unwrap_or_else(|| fallback.to_string())
}

/// Publication date from `article:published_time` or `<meta name="date">`.
#[must_use]
pub fn published_date(doc: &Document) -> Option<NaiveDate> {
    let raw = dom::meta_content(doc, "property", "article:published_time")
        .or_else(|| dom::meta_content(doc, "name", "date"))?;
    parse_meta_date(&raw)
}

/// Parse the date part of a meta value.
///
/// Full RFC 3339 timestamps keep their own calendar date; anything else is
/// read from its first 10 characters.
#[must_use]
pub fn parse_meta_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    let head: String = value.chars().take(10).collect();
    ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&head, fmt).ok())
}

/// Whether any `<div>` has a table-of-contents class name.
#[must_use]
pub fn has_toc(doc: &Document) -> bool {
    doc.select("div[class]").nodes().iter().any(|node| {
        get_attribute(&Selection::from(*node), "class").is_some_and(|class| TOC_CLASS.is_match(&class))
    })
}
