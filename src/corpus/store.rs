//! Corpus store.
//!
//! The curated document is fetched once and shared for the lifetime of the
//! store. Book documents are fetched on every call.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::adapters::CorpusSource;
use crate::domain::corpus::BookDocument;
use crate::domain::{BookId, ContentError, CorpusDatabase, DetailedHadith};

/// Resource name of the curated document
pub const CURATED_RESOURCE: &str = "hadiths.json";

/// Read access to both corpora
pub struct CorpusStore {
    source: Arc<dyn CorpusSource>,
    curated: OnceCell<Arc<CorpusDatabase>>,
}

impl CorpusStore {
    pub fn new(source: Arc<dyn CorpusSource>) -> Self {
        Self {
            source,
            curated: OnceCell::new(),
        }
    }

    /// Load the curated corpus, fetching it only on first success.
    ///
    /// Concurrent first callers wait on a single fetch. A failed load is not
    /// cached, so the next call fetches again.
    pub async fn load_curated_corpus(&self) -> Result<Arc<CorpusDatabase>, ContentError> {
        self.curated
            .get_or_try_init(|| async {
                let body = self.source.fetch(CURATED_RESOURCE).await?;
                let db: CorpusDatabase = serde_json::from_str(&body)
                    .map_err(|e| ContentError::corpus(CURATED_RESOURCE, e))?;

                info!(
                    source = self.source.name(),
                    hadiths = db.hadiths.len(),
                    quran_verses = db.quran_verses.len(),
                    ramadan_content = db.ramadan_content.len(),
                    "Curated corpus loaded"
                );
                Ok::<_, ContentError>(Arc::new(db))
            })
            .await
            .map(Arc::clone)
    }

    /// Load one book; failures degrade to an empty list
    pub async fn load_book_corpus(&self, book: BookId) -> Vec<DetailedHadith> {
        let resource = book.resource();

        let result = match self.source.fetch(&resource).await {
            Ok(body) => serde_json::from_str::<BookDocument>(&body)
                .map(|doc| doc.hadiths)
                .map_err(|e| ContentError::corpus(&resource, e)),
            Err(e) => Err(e),
        };

        match result {
            Ok(hadiths) => hadiths,
            Err(e) => {
                warn!(%book, error = %e, "Book corpus unavailable, skipping");
                Vec::new()
            }
        }
    }
}
