//! Shared test doubles for the corpus source and the text generator.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use hikma::adapters::{AdapterOutput, CorpusSource, GenerationCall, TextGenerator};
use hikma::domain::{BookId, ContentError};

/// In-memory corpus source that records every fetch
#[derive(Default)]
pub struct MockSource {
    resources: Mutex<HashMap<String, String>>,
    fetches: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, resource: &str, body: impl Into<String>) -> Self {
        self.insert(resource, body);
        self
    }

    pub fn insert(&self, resource: &str, body: impl Into<String>) {
        self.resources
            .lock()
            .unwrap()
            .insert(resource.to_string(), body.into());
    }

    pub fn fetch_count(&self, resource: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.as_str() == resource)
            .count()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

#[async_trait]
impl CorpusSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, resource: &str) -> Result<String, ContentError> {
        self.fetches.lock().unwrap().push(resource.to_string());
        self.resources
            .lock()
            .unwrap()
            .get(resource)
            .cloned()
            .ok_or_else(|| ContentError::CorpusUnavailable {
                resource: resource.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            })
    }
}

/// Scripted generator that records every call
#[derive(Default)]
pub struct MockGenerator {
    responses: Mutex<VecDeque<Result<String, ContentError>>>,
    calls: Mutex<Vec<GenerationCall>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure
    pub fn fail(self, error: ContentError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<GenerationCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, call: &GenerationCall) -> Result<AdapterOutput, ContentError> {
        self.calls.lock().unwrap().push(call.clone());
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(result) => result.map(AdapterOutput::new),
            None => Err(ContentError::GenerationFailed {
                status: None,
                message: "no scripted response".to_string(),
            }),
        }
    }
}

/// Curated document with two entries per collection
pub fn curated_json() -> String {
    json!({
        "hadiths": [
            {"id": 1, "content": "La patience est une lumière.", "source": "Sahih Muslim 223", "category": "vertus", "narrator": "Abu Malik al-Ash'ari"},
            {"id": 2, "content": "Le fort n'est pas celui qui terrasse les gens.", "source": "Sahih al-Bukhari 6114", "category": "colère"}
        ],
        "quran_verses": [
            {"id": 10, "content": "Allah ne charge aucune âme au-delà de sa capacité.", "source": "Al-Baqara 2:286", "category": "épreuve"},
            {"id": 11, "content": "Certes, avec la difficulté est une facilité.", "source": "Ash-Sharh 94:6", "category": "espoir"}
        ],
        "ramadan_content": [
            {"id": 20, "content": "Le jeûne est un bouclier.", "source": "Sahih al-Bukhari 1894", "category": "jeûne"},
            {"id": 21, "content": "Celui qui jeûne le Ramadan avec foi sera pardonné.", "source": "Sahih al-Bukhari 38", "category": "pardon"}
        ]
    })
    .to_string()
}

/// Book document with `matching` entries containing `word` followed by
/// `other` entries that do not
pub fn book_json(book: BookId, word: &str, matching: usize, other: usize) -> String {
    let mut hadiths = Vec::new();
    for i in 0..matching {
        hadiths.push(json!({
            "id": i,
            "hadithNumber": i + 1,
            "french": format!("Texte {} sur la {} du croyant.", i, word),
            "source": format!("{} {}", book, i + 1),
            "reference": {"book": 1, "hadith": i + 1}
        }));
    }
    for i in matching..matching + other {
        hadiths.push(json!({
            "id": i,
            "french": format!("Texte {} sans rapport.", i),
            "source": format!("{} {}", book, i + 1),
            "reference": {}
        }));
    }
    json!({ "hadiths": hadiths }).to_string()
}

/// Generated payload as the model would return it
pub fn generated(content: &str, source: &str) -> String {
    json!({ "content": content, "source": source }).to_string()
}
