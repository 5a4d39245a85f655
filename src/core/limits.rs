//! Bounds and timeouts for pipeline calls.
//!
//! Keeps the keyword search cheap and every external call bounded:
//! - Minimum query length before any fetch happens
//! - Per-book and global match caps
//! - Corpus fetch and generation timeouts

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Keyword search bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Minimum trimmed query length in characters (default: 3)
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Maximum matches kept from one book (default: 20)
    #[serde(default = "default_max_per_book")]
    pub max_per_book: usize,

    /// Maximum matches overall (default: 100)
    #[serde(default = "default_max_total")]
    pub max_total: usize,
}

fn default_min_query_chars() -> usize {
    3
}
fn default_max_per_book() -> usize {
    20
}
fn default_max_total() -> usize {
    100
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
            max_per_book: default_max_per_book(),
            max_total: default_max_total(),
        }
    }
}

impl SearchLimits {
    /// Whether a query is long enough to be worth a corpus scan
    pub fn accepts(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.min_query_chars
    }
}

/// Timeouts for external calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutSettings {
    /// Per corpus resource fetch in seconds (default: 10)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,

    /// Per generation call in seconds (default: 60)
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_seconds: u64,
}

fn default_fetch_timeout() -> u64 {
    10
}
fn default_generation_timeout() -> u64 {
    60
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: default_fetch_timeout(),
            generation_timeout_seconds: default_generation_timeout(),
        }
    }
}

impl TimeoutSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_seconds)
    }
}
