//! Generative resolver.
//!
//! Three call modes over a `TextGenerator`:
//! - fresh generation: schema-constrained JSON, temperature 0.7
//! - analysis of a keyword match: JSON asked by prompt only, temperature 0.3
//! - explanation: free text that never fails

use std::sync::Arc;

use tracing::{debug, warn};

use super::parse::parse_generated;
use super::prompts::{analysis_prompt, explanation_prompt, generation_prompt};
use crate::adapters::{GenerationCall, ResponseFormat, TextGenerator};
use crate::domain::{Category, ContentError, ContentItem};

pub const GENERATION_TEMPERATURE: f64 = 0.7;
pub const ANALYSIS_TEMPERATURE: f64 = 0.3;
pub const EXPLANATION_TEMPERATURE: f64 = 0.7;

/// Returned by `explain_content` when no explanation can be produced
pub const EXPLANATION_FALLBACK: &str =
    "L'explication n'est pas disponible pour le moment. Veuillez réessayer plus tard.";

pub struct GenerativeResolver {
    generator: Arc<dyn TextGenerator>,
}

impl GenerativeResolver {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate a fresh quotation for a category
    pub async fn generate_via_model(
        &self,
        category: Category,
        topic: Option<&str>,
    ) -> Result<ContentItem, ContentError> {
        let call = GenerationCall::new(
            generation_prompt(category, topic),
            GENERATION_TEMPERATURE,
            ResponseFormat::Schema,
        );
        debug!(%category, topic, "Requesting fresh generation");
        self.call_and_parse(&call).await
    }

    /// Reproduce or condense a hadith found for `user_query`.
    ///
    /// The JSON shape is requested through the prompt only; no response schema
    /// is sent for this mode.
    pub async fn analyze_via_model(
        &self,
        found_text: &str,
        found_source: &str,
        user_query: &str,
    ) -> Result<ContentItem, ContentError> {
        let call = GenerationCall::new(
            analysis_prompt(found_text, found_source, user_query),
            ANALYSIS_TEMPERATURE,
            ResponseFormat::PromptOnlyJson,
        );
        debug!(source = found_source, user_query, "Requesting analysis of keyword match");
        self.call_and_parse(&call).await
    }

    /// Pedagogical explanation in Markdown, or a fallback sentence
    pub async fn explain_content(&self, text: &str, source: &str) -> String {
        let call = GenerationCall::new(
            explanation_prompt(text, source),
            EXPLANATION_TEMPERATURE,
            ResponseFormat::FreeText,
        );

        match self.generator.generate(&call).await {
            Ok(output) if !output.content.trim().is_empty() => output.content.trim().to_string(),
            Ok(_) => {
                warn!(source, "Explanation came back empty");
                EXPLANATION_FALLBACK.to_string()
            }
            Err(e) => {
                warn!(source, error = %e, "Explanation failed");
                EXPLANATION_FALLBACK.to_string()
            }
        }
    }

    async fn call_and_parse(&self, call: &GenerationCall) -> Result<ContentItem, ContentError> {
        let output = self.generator.generate(call).await?;
        debug!(
            adapter = self.generator.name(),
            tokens_used = ?output.tokens_used,
            "Parsing generated content"
        );
        parse_generated(&output.content)
    }
}
