//! Configuration for the content pipeline.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (HIKMA_API_KEY / GEMINI_API_KEY, HIKMA_MODEL,
//!    HIKMA_CORPUS_URL, HIKMA_CORPUS_DIR)
//! 2. Config file (.hikma/config.yaml)
//! 3. Defaults (corpus in ~/.hikma/corpus, public Gemini endpoint)
//!
//! Config file discovery:
//! - Searches current directory and parents for .hikma/config.yaml
//! - A relative corpus `dir` is relative to the config file's project root

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::core::limits::{SearchLimits, TimeoutSettings};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub generation: Option<GenerationConfig>,
    #[serde(default)]
    pub search: Option<SearchLimits>,
    #[serde(default)]
    pub timeouts: Option<TimeoutSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorpusConfig {
    /// Base URL serving hadiths.json and books/*.json
    pub base_url: Option<String>,
    /// Local directory with the same layout (relative to the project root)
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

/// Where corpus documents come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusLocation {
    Url(String),
    Dir(PathBuf),
}

impl std::fmt::Display for CorpusLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusLocation::Url(url) => write!(f, "{}", url),
            CorpusLocation::Dir(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Generation endpoint settings
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
}

impl GenerationSettings {
    /// Key suitable for display: last four characters only
    pub fn masked_key(&self) -> String {
        match &self.api_key {
            Some(key) if key.chars().count() > 4 => {
                let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
                format!("****{}", tail)
            }
            Some(_) => "****".to_string(),
            None => "(not set)".to_string(),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub corpus: CorpusLocation,
    pub generation: GenerationSettings,
    pub search: SearchLimits,
    pub timeouts: TimeoutSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".hikma").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge file settings and environment over defaults
fn resolve(
    config_path: Option<&Path>,
    file: Option<ConfigFile>,
    env: impl Fn(&str) -> Option<String>,
    default_corpus_dir: PathBuf,
) -> ResolvedConfig {
    let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    // Project root is the parent of .hikma/
    let base_dir = config_path
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."));

    let (corpus_file, generation_file, search, timeouts) = match file {
        Some(f) => (
            f.corpus,
            f.generation,
            f.search.unwrap_or_default(),
            f.timeouts.unwrap_or_default(),
        ),
        None => (CorpusConfig::default(), None, SearchLimits::default(), TimeoutSettings::default()),
    };

    let corpus = if let Some(url) = env("HIKMA_CORPUS_URL") {
        CorpusLocation::Url(url)
    } else if let Some(dir) = env("HIKMA_CORPUS_DIR") {
        CorpusLocation::Dir(PathBuf::from(dir))
    } else if let Some(url) = corpus_file.base_url {
        CorpusLocation::Url(url)
    } else if let Some(dir) = corpus_file.dir {
        CorpusLocation::Dir(resolve_path(base_dir, &dir))
    } else {
        CorpusLocation::Dir(default_corpus_dir)
    };

    let api_key = env("HIKMA_API_KEY")
        .or_else(|| env("GEMINI_API_KEY"))
        .or_else(|| generation_file.as_ref().and_then(|g| g.api_key.clone()));

    let endpoint = generation_file
        .as_ref()
        .and_then(|g| g.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let model = env("HIKMA_MODEL")
        .or_else(|| generation_file.as_ref().and_then(|g| g.model.clone()))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    ResolvedConfig {
        corpus,
        generation: GenerationSettings {
            api_key,
            endpoint,
            model,
        },
        search,
        timeouts,
        config_file: config_path.map(Path::to_path_buf),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_corpus_dir = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".hikma")
        .join("corpus");

    let config_path = find_config_file();
    let file = match config_path {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    Ok(resolve(
        config_path.as_deref(),
        file,
        |name| std::env::var(name).ok(),
        default_corpus_dir,
    ))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(None, None, no_env, PathBuf::from("/home/u/.hikma/corpus"));

        assert_eq!(config.corpus, CorpusLocation::Dir(PathBuf::from("/home/u/.hikma/corpus")));
        assert_eq!(config.generation.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.generation.model, DEFAULT_MODEL);
        assert!(config.generation.api_key.is_none());
        assert_eq!(config.search, SearchLimits::default());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let hikma_dir = temp.path().join(".hikma");
        std::fs::create_dir_all(&hikma_dir).unwrap();

        let config_path = hikma_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
corpus:
  dir: public/data
generation:
  model: gemini-1.5-pro
search:
  max_total: 50
timeouts:
  generation_timeout_seconds: 20
"#
        )
        .unwrap();

        let parsed = load_config_file(&config_path).unwrap();
        assert_eq!(parsed.version, "1.0");
        assert_eq!(parsed.corpus.dir.as_deref(), Some("public/data"));

        let config = resolve(Some(&config_path), Some(parsed), no_env, PathBuf::from("/unused"));
        assert_eq!(config.corpus, CorpusLocation::Dir(temp.path().join("public/data")));
        assert_eq!(config.generation.model, "gemini-1.5-pro");
        assert_eq!(config.search.max_total, 50);
        assert_eq!(config.search.max_per_book, 20);
        assert_eq!(config.timeouts.generation_timeout_seconds, 20);
        assert_eq!(config.timeouts.fetch_timeout_seconds, 10);
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile = serde_yaml::from_str(
            r#"
version: "1.0"
corpus:
  base_url: https://cdn.example.com/data
generation:
  api_key: from-file
"#,
        )
        .unwrap();

        let vars: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "from-gemini-env"),
            ("HIKMA_CORPUS_DIR", "/srv/corpus"),
        ]
        .into_iter()
        .collect();

        let config = resolve(
            None,
            Some(file),
            |name| vars.get(name).map(|v| v.to_string()),
            PathBuf::from("/unused"),
        );

        assert_eq!(config.corpus, CorpusLocation::Dir(PathBuf::from("/srv/corpus")));
        assert_eq!(config.generation.api_key.as_deref(), Some("from-gemini-env"));
    }

    #[test]
    fn test_masked_key() {
        let mut settings = GenerationSettings {
            api_key: Some("AIzaSyExample1234".to_string()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        };
        assert_eq!(settings.masked_key(), "****1234");

        settings.api_key = None;
        assert_eq!(settings.masked_key(), "(not set)");
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
