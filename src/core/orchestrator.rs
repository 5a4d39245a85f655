//! Content orchestrator.
//!
//! Runs the fallback chain for a request. Non-terminal steps are tried in
//! order and may yield nothing or fail; both are logged and the next step
//! runs. The terminal fresh generation is the only step whose error reaches
//! the caller.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::adapters::{CorpusSource, FsCorpusSource, GeminiAdapter, HttpCorpusSource, TextGenerator};
use crate::config::{CorpusLocation, ResolvedConfig};
use crate::corpus::{CorpusStore, KeywordSearch, LocalResolver};
use crate::domain::{
    Category, ContentError, ContentItem, DetailedHadith, GenerationRequest, ResolutionStep, Resolved,
};
use crate::generation::GenerativeResolver;

use super::limits::SearchLimits;

/// Main content orchestrator
pub struct ContentOrchestrator {
    search: KeywordSearch,
    local: LocalResolver,
    generative: GenerativeResolver,
}

impl ContentOrchestrator {
    /// Create an orchestrator over explicit collaborators
    pub fn new(
        source: Arc<dyn CorpusSource>,
        generator: Arc<dyn TextGenerator>,
        limits: SearchLimits,
    ) -> Self {
        let store = Arc::new(CorpusStore::new(source));
        Self {
            search: KeywordSearch::new(Arc::clone(&store), limits),
            local: LocalResolver::new(store),
            generative: GenerativeResolver::new(generator),
        }
    }

    /// Create an orchestrator from resolved configuration
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let source: Arc<dyn CorpusSource> = match &config.corpus {
            CorpusLocation::Url(url) => {
                Arc::new(HttpCorpusSource::new(url.clone(), config.timeouts.fetch_timeout()))
            }
            CorpusLocation::Dir(dir) => Arc::new(FsCorpusSource::new(dir.clone())),
        };

        let generator = GeminiAdapter::new(
            config.generation.api_key.clone(),
            config.timeouts.generation_timeout(),
        )
        .with_endpoint(config.generation.endpoint.clone())
        .with_model(config.generation.model.clone());

        Self::new(source, Arc::new(generator), config.search.clone())
    }

    /// Produce one item for a request
    pub async fn generate_content(&self, request: &GenerationRequest) -> Result<ContentItem, ContentError> {
        self.resolve(request).await.map(|resolved| resolved.item)
    }

    /// Produce one item and report which step served it
    #[instrument(skip(self, request), fields(category = %request.category, request_id = tracing::field::Empty))]
    pub async fn resolve(&self, request: &GenerationRequest) -> Result<Resolved, ContentError> {
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));

        for step in fallback_plan(request) {
            match self.attempt(step, request).await {
                Ok(Some(item)) => {
                    info!(%step, source = %item.source, "Content resolved");
                    return Ok(Resolved {
                        request_id,
                        item,
                        served_by: step,
                    });
                }
                Ok(None) => debug!(%step, "Step yielded nothing, falling through"),
                Err(e) => warn!(%step, error = %e, "Step failed, falling through"),
            }
        }

        let item = self
            .generative
            .generate_via_model(request.category, request.topic())
            .await
            .map_err(|e| {
                warn!(error = %e, "Terminal generation failed");
                e
            })?;

        info!(step = %ResolutionStep::GenerativeFallback, source = %item.source, "Content resolved");
        Ok(Resolved {
            request_id,
            item,
            served_by: ResolutionStep::GenerativeFallback,
        })
    }

    /// Keyword search over the book corpus
    pub async fn search(&self, query: &str) -> Vec<DetailedHadith> {
        self.search.search_corpus(query).await
    }

    /// Explanation of a text; never fails
    pub async fn explain(&self, text: &str, source: &str) -> String {
        self.generative.explain_content(text, source).await
    }

    async fn attempt(
        &self,
        step: ResolutionStep,
        request: &GenerationRequest,
    ) -> Result<Option<ContentItem>, ContentError> {
        let topic = request.topic();

        match step {
            ResolutionStep::KeywordAnalysis => {
                let Some(query) = topic else {
                    return Ok(None);
                };
                let Some(first) = self.search.search_corpus(query).await.into_iter().next() else {
                    return Ok(None);
                };
                self.generative
                    .analyze_via_model(&first.french, &first.source, query)
                    .await
                    .map(Some)
            }
            ResolutionStep::ThematicGeneration | ResolutionStep::GenerativeFallback => self
                .generative
                .generate_via_model(request.category, topic)
                .await
                .map(Some),
            ResolutionStep::LocalCorpus => Ok(self.local.resolve_local(request.category, topic).await),
        }
    }
}

/// Non-terminal steps for a request, in order
fn fallback_plan(request: &GenerationRequest) -> Vec<ResolutionStep> {
    let has_topic = request.topic().is_some();
    let mut plan = Vec::with_capacity(3);

    match request.category {
        Category::ResearchAi if has_topic => plan.push(ResolutionStep::KeywordAnalysis),
        Category::Thematic if has_topic => plan.push(ResolutionStep::ThematicGeneration),
        _ => {}
    }
    plan.push(ResolutionStep::LocalCorpus);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_plan() {
        let research = GenerationRequest::new(Category::ResearchAi).with_topic("patience");
        assert_eq!(
            fallback_plan(&research),
            vec![ResolutionStep::KeywordAnalysis, ResolutionStep::LocalCorpus]
        );

        let thematic = GenerationRequest::new(Category::Thematic).with_topic("famille");
        assert_eq!(
            fallback_plan(&thematic),
            vec![ResolutionStep::ThematicGeneration, ResolutionStep::LocalCorpus]
        );

        let blank = GenerationRequest::new(Category::ResearchAi).with_topic("  ");
        assert_eq!(fallback_plan(&blank), vec![ResolutionStep::LocalCorpus]);

        let hadith = GenerationRequest::new(Category::Hadith).with_topic("patience");
        assert_eq!(fallback_plan(&hadith), vec![ResolutionStep::LocalCorpus]);
    }
}
