//! Field extraction rules shared by the validators.

use serde_json::{Map, Value};

/// Returns the field as a string, if it is one.
pub(super) fn string_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

/// Returns the field as a non-blank string, if it is one.
pub(super) fn non_blank_string<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    string_field(object, key).filter(|text| !text.trim().is_empty())
}

/// Returns the string items of an array field in order, dropping anything
/// else. Missing or non-array fields give an empty list.
pub(super) fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Returns a field as text, accepting either a string or an array of strings
/// joined with newlines. Anything else gives an empty string.
pub(super) fn text_or_lines(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// Renders the object back to compact JSON for diagnostics.
pub(super) fn render(object: &Map<String, Value>) -> String {
    Value::Object(object.clone()).to_string()
}
