//! Corpus document shapes.
//!
//! Two datasets back the pipeline:
//! - the curated corpus, a single document with three collections
//! - the book corpus, one document per hadith collection

use serde::{Deserialize, Serialize};

use super::content::{Category, ContentItem};

/// Entry of the curated corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalEntry {
    pub id: u64,
    pub content: String,
    pub source: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrator: Option<String>,
}

impl LocalEntry {
    /// Case-insensitive topic match on content or category.
    /// `topic` must already be lower-cased.
    pub fn matches_topic(&self, topic: &str) -> bool {
        self.content.to_lowercase().contains(topic) || self.category.to_lowercase().contains(topic)
    }
}

impl From<&LocalEntry> for ContentItem {
    fn from(entry: &LocalEntry) -> Self {
        ContentItem::new(entry.content.clone(), entry.source.clone())
    }
}

/// The curated dataset (`hadiths.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDatabase {
    #[serde(default)]
    pub hadiths: Vec<LocalEntry>,
    #[serde(default)]
    pub quran_verses: Vec<LocalEntry>,
    #[serde(default)]
    pub ramadan_content: Vec<LocalEntry>,
}

impl CorpusDatabase {
    /// Curated collection backing a category, if any
    pub fn collection(&self, category: Category) -> Option<&[LocalEntry]> {
        match category {
            Category::Hadith => Some(&self.hadiths),
            Category::Quran => Some(&self.quran_verses),
            Category::Ramadan => Some(&self.ramadan_content),
            Category::Thematic | Category::ResearchAi => None,
        }
    }
}

/// Location of a hadith inside its book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HadithReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hadith: Option<u64>,
}

/// Entry of a per-book document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHadith {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hadith_number: Option<u64>,
    pub french: String,
    pub source: String,
    #[serde(default)]
    pub reference: HadithReference,
}

/// Per-book document (`books/<id>.json`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookDocument {
    #[serde(default)]
    pub hadiths: Vec<DetailedHadith>,
}

/// The six collections of the book corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookId {
    Abudawud,
    Bukhari,
    Ibnmajah,
    Malik,
    Muslim,
    Nasai,
}

impl BookId {
    /// Search order
    pub const ALL: [BookId; 6] = [
        BookId::Abudawud,
        BookId::Bukhari,
        BookId::Ibnmajah,
        BookId::Malik,
        BookId::Muslim,
        BookId::Nasai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookId::Abudawud => "abudawud",
            BookId::Bukhari => "bukhari",
            BookId::Ibnmajah => "ibnmajah",
            BookId::Malik => "malik",
            BookId::Muslim => "muslim",
            BookId::Nasai => "nasai",
        }
    }

    /// Resource name relative to the corpus root
    pub fn resource(self) -> String {
        format!("books/{}.json", self.as_str())
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_document_parsing() {
        let json = r#"{
            "hadiths": [
                {"id": 1, "content": "La pudeur fait partie de la foi.", "source": "Bukhari 24", "category": "foi", "narrator": "Ibn Umar"}
            ],
            "quran_verses": [
                {"id": 7, "content": "Allah ne charge aucune âme au-delà de sa capacité.", "source": "Al-Baqara 2:286", "category": "patience"}
            ]
        }"#;

        let db: CorpusDatabase = serde_json::from_str(json).unwrap();
        assert_eq!(db.hadiths.len(), 1);
        assert_eq!(db.hadiths[0].narrator.as_deref(), Some("Ibn Umar"));
        assert!(db.quran_verses[0].narrator.is_none());
        assert!(db.ramadan_content.is_empty());
        assert!(db.collection(Category::Thematic).is_none());
        assert_eq!(db.collection(Category::Quran).unwrap().len(), 1);
    }

    #[test]
    fn test_book_document_parsing() {
        let json = r#"{"hadiths": [
            {"id": 3, "hadithNumber": 12, "french": "Le fort n'est pas celui qui terrasse.", "source": "Muslim 2609", "reference": {"book": 45, "hadith": 141}},
            {"id": 4, "french": "Sans référence.", "source": "Muslim 2610"}
        ]}"#;

        let doc: BookDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.hadiths[0].hadith_number, Some(12));
        assert_eq!(doc.hadiths[0].reference.book, Some(45));
        assert_eq!(doc.hadiths[1].reference, HadithReference::default());
    }

    #[test]
    fn test_topic_match_is_case_insensitive() {
        let entry = LocalEntry {
            id: 1,
            content: "La Patience est une lumière.".to_string(),
            source: "Muslim 223".to_string(),
            category: "Vertus".to_string(),
            narrator: None,
        };
        assert!(entry.matches_topic("patience"));
        assert!(entry.matches_topic("vertu"));
        assert!(!entry.matches_topic("jeûne"));
    }

    #[test]
    fn test_book_resources() {
        assert_eq!(BookId::Bukhari.resource(), "books/bukhari.json");
        assert_eq!(BookId::ALL.len(), 6);
    }
}
