//! JSON object extraction from free text.
//!
//! Objects are located with a brace-depth scan rather than a regex so that
//! nested objects are captured whole. Quotes are not tracked: a brace inside
//! a string value still changes the depth, which can split or merge spans.
//! Unterminated objects at the end of the text are never emitted.

use fieldnotes_core::{ContentClassifier, Fact, FactError, FactSource};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::{debug, warn};

/// A balanced `{...}` substring of the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSpan<'a> {
    /// Byte offset of the opening brace.
    pub start: usize,

    /// Byte offset just past the closing brace.
    pub end: usize,

    pub text: &'a str,
}

/// Outcome of extracting and flattening every object in a text.
#[derive(Debug, Default)]
pub struct JsonExtraction {
    /// Successfully parsed objects, in document order.
    pub objects: Vec<Value>,

    /// Flattened facts of all parsed objects, in document order.
    pub facts: Vec<Fact>,

    /// One entry per span that failed to parse.
    pub errors: Vec<FactError>,
}

/// Find every top-level balanced-brace span in `text`.
#[must_use]
pub fn extract_json_objects(text: &str) -> Vec<JsonSpan<'_>> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (offset, ch) in text.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = offset;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let end = offset + 1;
                    spans.push(JsonSpan {
                        start,
                        end,
                        text: &text[start..end],
                    });
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        debug!("Dropping unterminated object starting at byte {start}");
    }

    spans
}

/// Flatten a JSON value into `(path, value)` pairs.
///
/// Object keys and array indices are joined with `.`; only scalars produce a
/// pair. Keys keep their encounter order and arrays their index order.
#[must_use]
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    flatten_into(value, "", &mut out);
    out
}

fn flatten_into(value: &Value, path: &str, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, &join_path(path, key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, &join_path(path, &index.to_string()), out);
            }
        }
        scalar => out.push((path.to_string(), stringify(scalar))),
    }
}

fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

/// String values are taken verbatim; everything else uses its JSON text.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract, parse and flatten every object in `text`.
///
/// A span that fails to parse is recorded in [`JsonExtraction::errors`] and
/// contributes no facts; the remaining spans are still processed.
#[must_use]
pub fn extract_facts(text: &str, classifier: &dyn ContentClassifier) -> JsonExtraction {
    let mut extraction = JsonExtraction::default();

    for span in extract_json_objects(text) {
        match serde_json::from_str::<Value>(span.text) {
            Ok(value) => {
                extraction
                    .facts
                    .extend(flatten(&value).into_iter().map(|(key, text)| {
                        let category = classifier.classify(&text).category;
                        Fact::new(key, text, FactSource::Json).with_category(category)
                    }));
                extraction.objects.push(value);
            }
            Err(source) => {
                warn!("Skipping invalid JSON at byte {}: {source}", span.start);
                extraction.errors.push(FactError::InvalidJson {
                    span: span.text.to_string(),
                    source,
                });
            }
        }
    }

    debug!(
        "Extracted {} facts from {} objects ({} invalid)",
        extraction.facts.len(),
        extraction.objects.len(),
        extraction.errors.len()
    );

    extraction
}

/// Pretty-print with four-space indentation, keeping key order.
pub fn pretty_print(value: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldnotes_core::{Category, IndicatorClassifier};
    use serde_json::json;

    #[test]
    fn test_extract_nested_objects_as_one_span() {
        let text = r#"note {"a": {"b": 1}} and {"c": 2} tail"#;
        let spans = extract_json_objects(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, r#"{"a": {"b": 1}}"#);
        assert_eq!(spans[1].text, r#"{"c": 2}"#);
        assert_eq!(&text[spans[1].start..spans[1].end], spans[1].text);
    }

    #[test]
    fn test_unterminated_object_is_dropped() {
        assert!(extract_json_objects(r#"{"a": {"b": 1}"#).is_empty());
        assert_eq!(extract_json_objects(r#"} {"a": 1}"#).len(), 1);
    }

    #[test]
    fn test_braces_in_strings_are_not_special() {
        let spans = extract_json_objects(r#"{"a": "}"} x"#);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, r#"{"a": "}"#);
    }

    #[test]
    fn test_flatten_order() {
        let value = json!({"a": {"b": 1}, "c": 2});
        assert_eq!(
            flatten(&value),
            vec![
                ("a.b".to_string(), "1".to_string()),
                ("c".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_flatten_preserves_source_key_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#)
            .expect("valid JSON should parse");
        let keys: Vec<String> = flatten(&value).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_flatten_arrays_and_scalars() {
        let value = json!({
            "hosts": ["a.example.com", {"ip": "10.0.0.5"}],
            "ok": true,
            "none": null,
            "name": "beacon",
            "empty": {}
        });
        assert_eq!(
            flatten(&value),
            vec![
                ("hosts.0".to_string(), "a.example.com".to_string()),
                ("hosts.1.ip".to_string(), "10.0.0.5".to_string()),
                ("ok".to_string(), "true".to_string()),
                ("none".to_string(), "null".to_string()),
                ("name".to_string(), "beacon".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_facts_continues_after_invalid_span() {
        let extraction = extract_facts(r#"{bad json} foo {"k":1}"#, &IndicatorClassifier);

        assert_eq!(extraction.errors.len(), 1);
        assert_eq!(extraction.errors[0].span(), "{bad json}");
        assert_eq!(extraction.objects.len(), 1);
        assert_eq!(extraction.facts.len(), 1);
        assert_eq!(extraction.facts[0].key, "k");
        assert_eq!(extraction.facts[0].value, "1");
        assert_eq!(extraction.facts[0].source, FactSource::Json);
    }

    #[test]
    fn test_extract_facts_classifies_values() {
        let extraction = extract_facts(r#"{"src": "8.8.8.8", "user": "bob"}"#, &IndicatorClassifier);
        let categories: Vec<Category> = extraction.facts.iter().map(|f| f.category).collect();
        assert_eq!(categories, vec![Category::IndicatorCheck, Category::None]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_pretty_print_uses_four_spaces() {
        let pretty = pretty_print(&json!({"a": 1})).expect("value should serialize");
        assert_eq!(pretty, "{\n    \"a\": 1\n}");
    }
}
