//! DOM helpers over `dom_query`.
//!
//! Text is read the way a reader sees it: every text node trimmed, empty
//! nodes dropped, the rest joined with single spaces.

pub use dom_query::{Document, Selection};

/// Tags removed before taking the visible text of a raw document.
pub const NON_CONTENT_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "aside", "form"];

/// Deep copy of a document, for destructive passes that must not touch the original.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

/// Whitespace-joined text of every node in `sel` and its descendants.
#[must_use]
pub fn joined_text(sel: &Selection) -> String {
    let mut parts: Vec<String> = Vec::new();
    for node in sel.nodes() {
        for descendant in node.descendants() {
            if !descendant.is_text() {
                continue;
            }
            let text = descendant.text();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
    }
    parts.join(" ")
}

/// Whitespace-joined text of each element matching `selector`, in document order.
#[must_use]
pub fn texts_of(doc: &Document, selector: &str) -> Vec<String> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| joined_text(&Selection::from(*node)))
        .collect()
}

/// Get any attribute value of the first node in `sel`.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Remove every element with one of the given tag names.
pub fn remove_tags(doc: &Document, tags: &[&str]) {
    let selector = tags.join(", ");
    let nodes = doc.select(&selector).nodes().to_vec();
    // Reverse order so nested matches go before their ancestors.
    for node in nodes.into_iter().rev() {
        Selection::from(node).remove();
    }
}

/// Visible text of the whole document after stripping non-content tags.
///
/// Mutates `doc`: the stripped elements are gone afterwards, so later
/// structural parsing sees the same reduced tree.
#[must_use]
pub fn visible_text(doc: &Document) -> String {
    remove_tags(doc, NON_CONTENT_TAGS);
    let root = doc.select("html");
    if root.is_empty() {
        joined_text(&doc.select("body"))
    } else {
        joined_text(&root)
    }
}

/// Trimmed text of the first `<title>`, if any.
#[must_use]
pub fn title(doc: &Document) -> Option<String> {
    let title = doc.select("title");
    let first = title.nodes().first()?;
    let text = joined_text(&Selection::from(*first));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// `content` of the first `<meta>` whose `attr` equals `value`.
#[must_use]
pub fn meta_content(doc: &Document, attr: &str, value: &str) -> Option<String> {
    let selector = format!(r#"meta[{attr}="{value}"]"#);
    let meta = doc.select(&selector);
    let first = meta.nodes().first()?;
    get_attribute(&Selection::from(*first), "content")
}
