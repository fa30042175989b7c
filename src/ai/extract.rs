//! Recover a JSON array from free-form model output.
//!
//! Models wrap structured answers in prose or markdown fences. The payload is
//! taken to be everything from the first `[` to the last `]`. That is a
//! heuristic: a truncated array, or brackets in the surrounding prose, make it
//! fail, and the caller falls back to placeholder data.

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::ExtractionError;

/// The slice between the first `[` and the last `]`, inclusive.
pub fn array_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse the bracketed payload of `text` as a JSON array of `T`.
pub fn extract_json_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ExtractionError> {
    let Some(candidate) = array_span(text) else {
        trace!("no bracket pair in model output");
        return Err(ExtractionError::NoArray);
    };
    trace!(len = candidate.len(), "parsing bracketed payload");
    Ok(serde_json::from_str(candidate)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn extracts_array_wrapped_in_prose() {
        let text = r#"Here you go: [{"store":"A"},{"store":"B"}] hope that helps!"#;
        let items: Vec<Value> = extract_json_array(text).unwrap();
        assert_eq!(items, vec![json!({"store":"A"}), json!({"store":"B"})]);
    }

    #[test]
    fn extracts_from_markdown_fence() {
        let text = "```json\n[{\"store\": \"A\", \"price\": \"$5\"}]\n```";
        let items: Vec<Value> = extract_json_array(text).unwrap();
        assert_eq!(items, vec![json!({"store":"A","price":"$5"})]);
    }

    #[test]
    fn nested_arrays_survive() {
        let text = r#"[{"tags":["a","b"]}]"#;
        let items: Vec<Value> = extract_json_array(text).unwrap();
        assert_eq!(items[0]["tags"], json!(["a", "b"]));
    }

    #[test]
    fn missing_brackets() {
        let err = extract_json_array::<Value>("Sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, ExtractionError::NoArray));
        let err = extract_json_array::<Value>("only an opening [ here").unwrap_err();
        assert!(matches!(err, ExtractionError::NoArray));
    }

    #[test]
    fn closing_before_opening() {
        let err = extract_json_array::<Value>("] backwards [").unwrap_err();
        assert!(matches!(err, ExtractionError::NoArray));
    }

    #[test]
    fn truncated_array_is_rejected() {
        let text = r#"[{"store":"A"},{"store":"B""#;
        assert!(matches!(
            extract_json_array::<Value>(text),
            Err(ExtractionError::NoArray)
        ));
        let text = r#"[{"store":"A"},{"store": ["B"]"#;
        assert!(matches!(
            extract_json_array::<Value>(text),
            Err(ExtractionError::InvalidJson(_))
        ));
    }

    #[test]
    fn multiple_bracket_pairs_span_too_much() {
        let text = r#"[{"store":"A"}] and also [{"store":"B"}]"#;
        assert!(matches!(
            extract_json_array::<Value>(text),
            Err(ExtractionError::InvalidJson(_))
        ));
    }

    #[test]
    fn bracket_in_trailing_comment() {
        let text = r#"[{"store":"A"}] // see [1]"#;
        assert!(extract_json_array::<Value>(text).is_err());
    }

    #[test]
    fn empty_array() {
        let items: Vec<Value> = extract_json_array("nothing found: []").unwrap();
        assert!(items.is_empty());
    }
}
