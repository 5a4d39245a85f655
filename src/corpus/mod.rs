//! Curated and book corpora.
//!
//! - Store: fetches documents through a `CorpusSource`, memoizing the curated one
//! - Search: bounded keyword scan over the six books
//! - Local: random pick from the curated collections

pub mod local;
pub mod search;
pub mod store;

pub use local::LocalResolver;
pub use search::KeywordSearch;
pub use store::{CorpusStore, CURATED_RESOURCE};
