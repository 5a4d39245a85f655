//! Gemini adapter for text generation.
//!
//! Calls `POST <endpoint>/v1beta/models/<model>:generateContent?key=<key>`.
//! Safety thresholds are relaxed to `BLOCK_NONE` on every harm category:
//! the generated material is scripture and stricter defaults refuse it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{AdapterOutput, GenerationCall, ResponseFormat, TextGenerator};
use crate::domain::ContentError;

/// Default public endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini `generateContent` client
pub struct GeminiAdapter {
    api_key: Option<String>,
    endpoint: String,
    model: String,
    call_timeout: Duration,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl GeminiAdapter {
    /// Create an adapter against the public endpoint
    pub fn new(api_key: Option<String>, call_timeout: Duration) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            call_timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Override the endpoint base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build the API URL (without the key)
    fn api_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    /// Build the request body for a call
    fn request_body(call: &GenerationCall) -> Value {
        let mut generation_config = json!({ "temperature": call.temperature });
        if call.format == ResponseFormat::Schema {
            generation_config["responseMimeType"] = json!("application/json");
            generation_config["responseSchema"] = json!({
                "type": "OBJECT",
                "properties": {
                    "content": { "type": "STRING" },
                    "source": { "type": "STRING" }
                },
                "required": ["content", "source"]
            });
        }

        let safety_settings: Vec<Value> = HARM_CATEGORIES
            .iter()
            .map(|category| json!({ "category": category, "threshold": "BLOCK_NONE" }))
            .collect();

        json!({
            "contents": [{ "parts": [{ "text": call.prompt }] }],
            "generationConfig": generation_config,
            "safetySettings": safety_settings,
        })
    }

    async fn send(&self, api_key: &str, call: &GenerationCall) -> Result<AdapterOutput, ContentError> {
        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", api_key)])
            .json(&Self::request_body(call))
            .send()
            .await
            .map_err(|e| ContentError::GenerationFailed {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| ContentError::InvalidGenerationShape(format!(
                    "unreadable response envelope: {}",
                    e
                )))?;

        let tokens_used = parsed.usage_metadata.and_then(|u| u.total_token_count);
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ContentError::InvalidGenerationShape("response contains no generated text".to_string())
            })?;

        debug!(tokens_used = ?tokens_used, chars = text.chars().count(), "Generation completed");

        Ok(AdapterOutput {
            content: text,
            tokens_used,
        })
    }
}

/// Map a non-success response to the error taxonomy
fn classify_failure(status: u16, body: &str) -> ContentError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            }
        });

    let lowered = message.to_lowercase();
    if lowered.contains("leaked") || lowered.contains("revoked") {
        warn!(status, "Generation key reported as revoked");
        return ContentError::CredentialRevoked { message };
    }

    ContentError::GenerationFailed {
        status: Some(status),
        message,
    }
}

#[async_trait]
impl TextGenerator for GeminiAdapter {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, call: &GenerationCall) -> Result<AdapterOutput, ContentError> {
        let api_key = self.api_key.as_deref().ok_or(ContentError::MissingCredential)?;

        timeout(self.call_timeout, self.send(api_key, call))
            .await
            .map_err(|_| ContentError::GenerationFailed {
                status: None,
                message: format!("timed out after {:?}", self.call_timeout),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let adapter = GeminiAdapter::new(Some("KEY".to_string()), Duration::from_secs(5))
            .with_endpoint("http://localhost:8080/")
            .with_model("gemini-test");
        assert_eq!(
            adapter.api_url(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_schema_only_on_schema_calls() {
        let body = GeminiAdapter::request_body(&GenerationCall::new("p", 0.7, ResponseFormat::Schema));
        assert_eq!(body["generationConfig"]["responseSchema"]["required"], json!(["content", "source"]));
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);

        let body = GeminiAdapter::request_body(&GenerationCall::new("p", 0.3, ResponseFormat::PromptOnlyJson));
        assert!(body["generationConfig"].get("responseSchema").is_none());
        assert!(body["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn test_classify_failure() {
        let leaked = classify_failure(
            403,
            r#"{"error":{"code":403,"message":"Your API key was reported as leaked. Please use another API key.","status":"PERMISSION_DENIED"}}"#,
        );
        assert!(matches!(leaked, ContentError::CredentialRevoked { .. }));

        let quota = classify_failure(429, r#"{"error":{"message":"Resource has been exhausted"}}"#);
        match quota {
            ContentError::GenerationFailed { status, message } => {
                assert_eq!(status, Some(429));
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let bare = classify_failure(502, "");
        assert!(bare.to_string().contains("HTTP 502"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let adapter = GeminiAdapter::new(Some("  ".to_string()), Duration::from_secs(5));
        assert!(adapter.api_key.is_none());
    }
}
