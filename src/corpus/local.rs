//! Random pick from the curated corpus.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use super::store::CorpusStore;
use crate::domain::{Category, ContentItem, LocalEntry};

/// Serves curated entries for the hadith, coran and ramadan categories
pub struct LocalResolver {
    store: Arc<CorpusStore>,
}

impl LocalResolver {
    pub fn new(store: Arc<CorpusStore>) -> Self {
        Self { store }
    }

    /// Pick one entry for a category, narrowed by topic when one matches.
    ///
    /// Returns `None` for categories without a curated collection, for an
    /// empty collection, and when the corpus cannot be loaded.
    pub async fn resolve_local(&self, category: Category, topic: Option<&str>) -> Option<ContentItem> {
        // Avoid loading the corpus for categories it cannot serve
        if !category_has_collection(category) {
            return None;
        }

        let db = match self.store.load_curated_corpus().await {
            Ok(db) => db,
            Err(e) => {
                warn!(%category, error = %e, "Curated corpus unavailable");
                return None;
            }
        };

        let collection = db.collection(category)?;
        pick(collection, topic).map(ContentItem::from)
    }
}

fn category_has_collection(category: Category) -> bool {
    matches!(category, Category::Hadith | Category::Quran | Category::Ramadan)
}

/// Choose uniformly among topic matches, or among all entries when none match
fn pick<'a>(collection: &'a [LocalEntry], topic: Option<&str>) -> Option<&'a LocalEntry> {
    let candidates = narrow_by_topic(collection, topic);
    candidates.choose(&mut rand::thread_rng()).copied()
}

fn narrow_by_topic<'a>(collection: &'a [LocalEntry], topic: Option<&str>) -> Vec<&'a LocalEntry> {
    let all: Vec<&LocalEntry> = collection.iter().collect();

    let Some(topic) = topic.map(str::trim).filter(|t| !t.is_empty()) else {
        return all;
    };

    let topic = topic.to_lowercase();
    let filtered: Vec<&LocalEntry> = collection.iter().filter(|e| e.matches_topic(&topic)).collect();

    if filtered.is_empty() {
        debug!(topic = %topic, "No entry matches topic, using full collection");
        all
    } else {
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, content: &str, category: &str) -> LocalEntry {
        LocalEntry {
            id,
            content: content.to_string(),
            source: format!("Source {}", id),
            category: category.to_string(),
            narrator: None,
        }
    }

    #[test]
    fn test_topic_narrows_candidates() {
        let collection = vec![
            entry(1, "La patience est une lumière.", "vertus"),
            entry(2, "Le jeûne est un bouclier.", "ramadan"),
            entry(3, "Soyez bons envers vos parents.", "famille"),
        ];

        let narrowed = narrow_by_topic(&collection, Some("PATIENCE"));
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].id, 1);

        // Category field is searched too
        let narrowed = narrow_by_topic(&collection, Some("famille"));
        assert_eq!(narrowed[0].id, 3);
    }

    #[test]
    fn test_unmatched_topic_falls_back_to_everything() {
        let collection = vec![entry(1, "a", "x"), entry(2, "b", "y")];
        assert_eq!(narrow_by_topic(&collection, Some("introuvable")).len(), 2);
        assert_eq!(narrow_by_topic(&collection, None).len(), 2);
        assert_eq!(narrow_by_topic(&collection, Some("  ")).len(), 2);
    }

    #[test]
    fn test_pick_from_empty_collection() {
        assert!(pick(&[], Some("patience")).is_none());
    }
}
