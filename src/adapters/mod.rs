//! Adapter interfaces for external systems.
//!
//! The pipeline talks to two collaborators:
//! - a corpus source serving static JSON documents
//! - a generative text endpoint

pub mod corpus_source;
pub mod gemini;

use async_trait::async_trait;

use crate::domain::ContentError;

pub use corpus_source::{FsCorpusSource, HttpCorpusSource};
pub use gemini::GeminiAdapter;

/// Shape constraint requested from the generative endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// JSON constrained by the `{content, source}` response schema
    Schema,

    /// JSON requested through the prompt wording only
    PromptOnlyJson,

    /// Free Markdown text
    FreeText,
}

/// One request to a text generator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationCall {
    pub prompt: String,
    pub temperature: f64,
    pub format: ResponseFormat,
}

impl GenerationCall {
    pub fn new(prompt: impl Into<String>, temperature: f64, format: ResponseFormat) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            format,
        }
    }
}

/// Output from a generator call
#[derive(Debug, Clone)]
pub struct AdapterOutput {
    /// Raw generated text
    pub content: String,

    /// Tokens used (if available)
    pub tokens_used: Option<u64>,
}

impl AdapterOutput {
    /// Create a new adapter output with just content
    pub fn new(content: String) -> Self {
        Self {
            content,
            tokens_used: None,
        }
    }
}

/// Source of the static corpus documents
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch the raw body of a resource such as `hadiths.json` or `books/malik.json`
    async fn fetch(&self, resource: &str) -> Result<String, ContentError>;
}

/// Generative text endpoint
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Run one generation; no retries
    async fn generate(&self, call: &GenerationCall) -> Result<AdapterOutput, ContentError>;
}
