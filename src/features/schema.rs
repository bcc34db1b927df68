//! JSON-LD schema type detection.

use serde_json::Value;

use crate::dom::{Document, Selection};

/// `@type` values declared by every `application/ld+json` block.
///
/// Top-level objects and the elements of a top-level array are inspected;
/// `@type` may be a string or an array of strings. Blocks that fail to
/// parse are skipped. Duplicates are removed, first occurrence wins.
#[must_use]
pub fn schema_types(doc: &Document) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for (index, script) in doc.select(r#"script[type="application/ld+json"]"#).nodes().iter().enumerate() {
        let json_text = Selection::from(*script).text().trim().to_string();
        if json_text.is_empty() {
            continue;
        }
        let data: Value = match serde_json::from_str(&json_text) {
            Ok(v) => v,
            Err(e) => {
                tracing::trace!(block = index, error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };
        match &data {
            Value::Object(_) => collect_types(&data, &mut types),
            Value::Array(items) => items.iter().for_each(|item| collect_types(item, &mut types)),
            _ => {}
        }
    }
    types
}

fn collect_types(value: &Value, types: &mut Vec<String>) {
    let Some(declared) = value.get("@type") else {
        return;
    };
    let names: Vec<&str> = match declared {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !types.iter().any(|t| t == name) {
            types.push(name.to_string());
        }
    }
}
