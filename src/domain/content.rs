//! Requests and results of the content pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ContentError;

/// Content domain selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Prophetic tradition
    #[serde(rename = "hadith")]
    Hadith,

    /// Quranic verse
    #[serde(rename = "coran")]
    Quran,

    /// Ramadan reminder
    #[serde(rename = "ramadan")]
    Ramadan,

    /// Always synthesized around a user theme
    #[serde(rename = "thematique")]
    Thematic,

    /// Keyword lookup in the book corpus, condensed by the model
    #[serde(rename = "recherche-ia")]
    ResearchAi,
}

impl Category {
    /// All categories, in menu order
    pub const ALL: [Category; 5] = [
        Category::Hadith,
        Category::Quran,
        Category::Ramadan,
        Category::Thematic,
        Category::ResearchAi,
    ];

    /// Wire name of the category
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hadith => "hadith",
            Category::Quran => "coran",
            Category::Ramadan => "ramadan",
            Category::Thematic => "thematique",
            Category::ResearchAi => "recherche-ia",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", s))
    }
}

/// Input to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub category: Category,

    /// Optional free-text theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl GenerationRequest {
    /// Request without a topic
    pub fn new(category: Category) -> Self {
        Self {
            category,
            topic: None,
        }
    }

    /// Set the topic
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Trimmed topic, `None` when absent or blank
    pub fn topic(&self) -> Option<&str> {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A quotation ready to be composited: the sacred text and where it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub text: String,
    pub source: String,
}

impl ContentItem {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }

    /// Build an item, rejecting blank text
    pub fn validated(text: &str, source: &str) -> Result<Self, ContentError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ContentError::SchemaViolation(
                "field `content` is empty".to_string(),
            ));
        }
        Ok(Self::new(text, source.trim()))
    }
}

/// Which fallback step produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStep {
    /// Keyword match condensed by the model
    KeywordAnalysis,

    /// Fresh generation for a thematic request
    ThematicGeneration,

    /// Random pick from the curated corpus
    LocalCorpus,

    /// Terminal fresh generation
    GenerativeFallback,
}

impl std::fmt::Display for ResolutionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResolutionStep::KeywordAnalysis => "keyword_analysis",
            ResolutionStep::ThematicGeneration => "thematic_generation",
            ResolutionStep::LocalCorpus => "local_corpus",
            ResolutionStep::GenerativeFallback => "generative_fallback",
        };
        f.write_str(name)
    }
}

/// A result together with the step that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    pub request_id: Uuid,
    pub item: ContentItem,
    pub served_by: ResolutionStep,
}
