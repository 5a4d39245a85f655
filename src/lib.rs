//! hikma - content-resolution pipeline for HikmaClips
//!
//! Turns a category and an optional topic into one quotation
//! (`text`, `source`) ready to be composited onto an image.
//!
//! # Architecture
//!
//! Resolution is a fallback chain:
//! - `recherche-ia`: keyword search in the hadith books, condensed by the model
//! - `thematique`: fresh generation around the theme
//! - curated corpus: random entry for hadith, coran and ramadan
//! - fresh generation as the last resort
//!
//! # Modules
//!
//! - `adapters`: External systems (corpus source, Gemini)
//! - `core`: Orchestration and limits
//! - `corpus`: Curated store, keyword search, local resolver
//! - `generation`: Prompts, response parsing, generative resolver
//! - `domain`: Data structures and errors
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! hikma generate --category coran
//! hikma generate --category recherche-ia --topic patience
//! hikma search "colère"
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod corpus;
pub mod domain;
pub mod generation;

// Re-export main types at crate root for convenience
pub use crate::core::ContentOrchestrator;
pub use domain::{Category, ContentError, ContentItem, GenerationRequest, ResolutionStep, Resolved};
