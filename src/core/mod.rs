//! Core orchestration logic.
//!
//! This module contains:
//! - Limits: search bounds and call timeouts
//! - Orchestrator: the fallback chain behind `generate_content`

pub mod limits;
pub mod orchestrator;

// Re-export commonly used types
pub use limits::{SearchLimits, TimeoutSettings};
pub use orchestrator::ContentOrchestrator;
