use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::errors::CompassError;

/// ========================================
/// Generation request/response wire shape
/// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    UniquePath,
    Recommendation,
    Chat,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::UniquePath => "unique_path",
            Flow::Recommendation => "recommendation",
            Flow::Chat => "chat",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tx {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl Tx {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), timestamp: Utc::now() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub system: String,
    pub user: String,
}

/// A named field the model must return, with a description shown to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputField {
    pub name: String,
    pub description: String,
}

impl OutputField {
    pub fn new(name: &str, description: &str) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub schema_version: String,
    pub flow: Flow,
    pub transaction: Tx,
    pub instruction: Instruction,
    pub inputs: BTreeMap<String, String>,
    pub outputs: Vec<OutputField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub fields: BTreeMap<String, String>,
}

impl GenerationResponse {
    /// Build a response from the model's JSON object, requiring every expected field as
    /// a non-blank string.
    pub fn from_value(
        value: serde_json::Value,
        expected: &[OutputField],
    ) -> Result<Self, CompassError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CompassError::Schema("model output is not a JSON object".into()))?;
        let mut fields = BTreeMap::new();
        for f in expected {
            let text = match obj.get(&f.name) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => {
                    return Err(CompassError::Schema(format!(
                        "field `{}` is not a string: {}",
                        f.name, other
                    )))
                }
                None => {
                    return Err(CompassError::Schema(format!("missing field `{}`", f.name)))
                }
            };
            if text.trim().is_empty() {
                return Err(CompassError::Schema(format!("field `{}` is blank", f.name)));
            }
            fields.insert(f.name.clone(), text);
        }
        Ok(Self { fields })
    }

    pub fn take(&mut self, name: &str) -> Result<String, CompassError> {
        self.fields
            .remove(name)
            .ok_or_else(|| CompassError::Schema(format!("missing field `{name}`")))
    }
}

/// Parse model text into the expected fields. Strict JSON first; when the model wraps the
/// object in prose or code fences, each balanced `{...}` is tried in order and the first
/// one carrying every expected field wins.
pub fn parse_model_output(
    content: &str,
    expected: &[OutputField],
) -> Result<GenerationResponse, CompassError> {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(content) {
        return GenerationResponse::from_value(v, expected);
    }
    let mut first_err = None;
    for obj in json_object_candidates(content) {
        let Ok(v) = serde_json::from_str::<serde_json::Value>(obj) else {
            continue;
        };
        match GenerationResponse::from_value(v, expected) {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                first_err.get_or_insert(e);
            }
        }
    }
    Err(first_err.unwrap_or_else(|| {
        CompassError::Schema(format!(
            "model did not return a JSON object.\n--- content start ---\n{}\n--- content end ---",
            content
        ))
    }))
}

/// Balanced `{...}` substrings of `s`, one per opening brace, in order of their start.
fn json_object_candidates(s: &str) -> impl Iterator<Item = &str> {
    s.match_indices('{')
        .filter_map(move |(i, _)| extract_first_json_object(&s[i..]))
}

/// Returns the first top-level JSON object substring. Braces inside string literals are
/// skipped.
pub fn extract_first_json_object(s: &str) -> Option<&str> {
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if start.is_some() => in_string = true,
            b'{' => {
                if start.is_none() {
                    start = Some(i);
                }
                depth += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return start.map(|st| &s[st..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_field() -> Vec<OutputField> {
        vec![OutputField::new("answer", "the answer")]
    }

    #[test]
    fn extracts_object_from_fenced_prose() {
        let content = "Sure! ```json\n{\"answer\": \"use {braces} freely\"}\n``` hope it helps";
        let resp = parse_model_output(content, &answer_field()).unwrap();
        assert_eq!(resp.fields["answer"], "use {braces} freely");
    }

    #[test]
    fn missing_field_is_schema_error() {
        let err = parse_model_output("{\"reply\":\"hi\"}", &answer_field()).unwrap_err();
        assert!(matches!(err, CompassError::Schema(m) if m.contains("answer")));
    }

    #[test]
    fn blank_or_non_string_field_is_rejected() {
        assert!(parse_model_output("{\"answer\":\"  \"}", &answer_field()).is_err());
        assert!(parse_model_output("{\"answer\":42}", &answer_field()).is_err());
    }

    #[test]
    fn skips_braced_prose_before_the_object() {
        let content = "Use a {placeholder} like this: {\"answer\": \"ok\"}";
        let resp = parse_model_output(content, &answer_field()).unwrap();
        assert_eq!(resp.fields["answer"], "ok");

        let nested = "{see {\"answer\": \"inner\"}}";
        let resp = parse_model_output(nested, &answer_field()).unwrap();
        assert_eq!(resp.fields["answer"], "inner");
    }

    #[test]
    fn wrapped_object_without_fields_reports_missing_field() {
        let err = parse_model_output("Here: {\"reply\": \"hi\"} done", &answer_field()).unwrap_err();
        assert!(matches!(err, CompassError::Schema(m) if m.contains("missing field")));
    }

    #[test]
    fn plain_text_is_rejected() {
        assert!(parse_model_output("just some words", &answer_field()).is_err());
    }
}
