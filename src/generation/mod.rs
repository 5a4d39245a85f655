//! Generative resolution.
//!
//! - Prompts: category to template table and the shared writing rules
//! - Parse: fence stripping, array repair and `{content, source}` validation
//! - Resolver: fresh generation, analysis of a found hadith, explanation

pub mod parse;
pub mod prompts;
pub mod resolver;

pub use parse::parse_generated;
pub use prompts::{template_for, PromptTemplate};
pub use resolver::{GenerativeResolver, EXPLANATION_FALLBACK};
