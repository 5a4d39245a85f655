//! Command-line interface for hikma.
//!
//! Drives the content pipeline the way the app does: generate a quotation,
//! browse keyword matches, ask for an explanation.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::core::ContentOrchestrator;
use crate::domain::{Category, ContentItem, GenerationRequest};

/// hikma - Quotation resolver for HikmaClips
#[derive(Parser, Debug)]
#[command(name = "hikma")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Produce one quotation for a category
    Generate {
        /// Content category
        #[arg(short, long, value_enum)]
        category: CategoryArg,

        /// Optional theme or search keywords
        #[arg(short, long)]
        topic: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search the hadith books by keyword
    Search {
        /// Search query (at least 3 characters)
        query: String,

        /// Maximum number of matches to print
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Explain a quotation
    Explain {
        /// Quoted text
        #[arg(long)]
        text: String,

        /// Source reference
        #[arg(long)]
        source: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Category for CLI (maps to Category)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Hadith,
    Coran,
    Ramadan,
    Thematique,
    #[value(name = "recherche-ia")]
    RechercheIa,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Hadith => Category::Hadith,
            CategoryArg::Coran => Category::Quran,
            CategoryArg::Ramadan => Category::Ramadan,
            CategoryArg::Thematique => Category::Thematic,
            CategoryArg::RechercheIa => Category::ResearchAi,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate {
                category,
                topic,
                json,
            } => generate(category.into(), topic, json).await,
            Commands::Search { query, limit } => search(&query, limit).await,
            Commands::Explain { text, source } => explain(&text, &source).await,
            Commands::Config => show_config(),
        }
    }
}

fn orchestrator() -> Result<ContentOrchestrator> {
    Ok(ContentOrchestrator::from_config(config::config()?))
}

/// Resolve and print one quotation
async fn generate(category: Category, topic: Option<String>, json: bool) -> Result<()> {
    let request = GenerationRequest { category, topic };

    let resolved = match orchestrator()?.resolve(&request).await {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("{}", render_item(&resolved.item));
        eprintln!("\n[served by {}]", resolved.served_by);
    }

    Ok(())
}

/// Plain-text rendering of a quotation and its reference
fn render_item(item: &ContentItem) -> String {
    format!("{}\n\nSource: {}", item.text, item.source)
}

/// Print keyword matches
async fn search(query: &str, limit: usize) -> Result<()> {
    let results = orchestrator()?.search(query).await;

    if results.is_empty() {
        println!("No matches for '{}'", query);
        return Ok(());
    }

    println!("{} match(es) for '{}':\n", results.len(), query);
    for hadith in results.iter().take(limit) {
        println!("[{}] {}\n", hadith.source, hadith.french.trim());
    }
    if results.len() > limit {
        println!("... and {} more", results.len() - limit);
    }

    Ok(())
}

/// Print an explanation
async fn explain(text: &str, source: &str) -> Result<()> {
    let explanation = orchestrator()?.explain(text, source).await;
    println!("{}", explanation);
    Ok(())
}

/// Show the resolved configuration
fn show_config() -> Result<()> {
    let config = config::config()?;

    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none, using defaults)".to_string())
    );
    println!("Corpus: {}", config.corpus);
    println!("Endpoint: {}", config.generation.endpoint);
    println!("Model: {}", config.generation.model);
    println!("API key: {}", config.generation.masked_key());
    println!(
        "Search: min {} chars, {} per book, {} total",
        config.search.min_query_chars, config.search.max_per_book, config.search.max_total
    );
    println!(
        "Timeouts: fetch {}s, generation {}s",
        config.timeouts.fetch_timeout_seconds, config.timeouts.generation_timeout_seconds
    );

    Ok(())
}
