//! Keyword search over the book corpus.
//!
//! Case-insensitive substring match on the French text. Results keep corpus
//! order (book order, then position in the book); nothing is ranked.

use std::sync::Arc;

use tracing::debug;

use super::store::CorpusStore;
use crate::core::limits::SearchLimits;
use crate::domain::{BookId, DetailedHadith};

/// Bounded scan across the six books
pub struct KeywordSearch {
    store: Arc<CorpusStore>,
    limits: SearchLimits,
}

impl KeywordSearch {
    pub fn new(store: Arc<CorpusStore>, limits: SearchLimits) -> Self {
        Self { store, limits }
    }

    /// Find hadiths whose French text contains `query`.
    ///
    /// Queries shorter than the minimum return nothing without fetching.
    /// Books are fetched one after another and the scan stops as soon as the
    /// global cap is reached.
    pub async fn search_corpus(&self, query: &str) -> Vec<DetailedHadith> {
        if !self.limits.accepts(query) {
            debug!(query, "Query too short, skipping search");
            return Vec::new();
        }

        let needle = query.trim().to_lowercase();
        let mut results = Vec::new();

        for book in BookId::ALL {
            if results.len() >= self.limits.max_total {
                break;
            }

            let remaining = self.limits.max_total - results.len();
            let before = results.len();
            let hadiths = self.store.load_book_corpus(book).await;
            results.extend(
                hadiths
                    .into_iter()
                    .filter(|h| h.french.to_lowercase().contains(&needle))
                    .take(self.limits.max_per_book.min(remaining)),
            );

            debug!(%book, matches = results.len() - before, "Book scanned");
        }

        debug!(query, total = results.len(), "Keyword search finished");
        results
    }
}
