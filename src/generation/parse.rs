//! Parsing of generated `{content, source}` payloads.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{ContentError, ContentItem};

#[derive(Debug, Deserialize)]
struct GeneratedPayload {
    content: String,
    source: String,
}

/// Remove a surrounding Markdown code fence, with or without a language tag
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. `json`) on the opening line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse generated text into a validated item.
///
/// A top-level array is unwrapped to its first element. Models sometimes
/// wrap the object in a one-element array; longer arrays are still cut to
/// index 0.
pub fn parse_generated(raw: &str) -> Result<ContentItem, ContentError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body).map_err(|e| {
        ContentError::InvalidGenerationShape(format!("response is not valid JSON: {}", e))
    })?;

    let value = match value {
        Value::Array(items) => {
            warn!(len = items.len(), "Generated JSON is an array, taking first element");
            items.into_iter().next().ok_or_else(|| {
                ContentError::InvalidGenerationShape("response is an empty array".to_string())
            })?
        }
        other => other,
    };

    if !value.is_object() {
        return Err(ContentError::InvalidGenerationShape(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    let payload: GeneratedPayload =
        serde_json::from_value(value).map_err(|e| ContentError::SchemaViolation(e.to_string()))?;

    ContentItem::validated(&payload.content, &payload.source)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
