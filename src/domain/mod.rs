//! Domain types for the HikmaClips content pipeline.
//!
//! This module contains the core data structures:
//! - Content: requests, categories and the resolved `(text, source)` pair
//! - Corpus: curated entries and the multi-book hadith collections
//! - Error: the pipeline error taxonomy

pub mod content;
pub mod corpus;
pub mod error;

// Re-export commonly used types
pub use content::{Category, ContentItem, GenerationRequest, ResolutionStep, Resolved};
pub use corpus::{BookId, CorpusDatabase, DetailedHadith, HadithReference, LocalEntry};
pub use error::ContentError;
