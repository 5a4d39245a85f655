//! Corpus sources: static JSON served over HTTP or read from a directory.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use super::CorpusSource;
use crate::domain::ContentError;

/// Serves resources from `<base_url>/<resource>`
pub struct HttpCorpusSource {
    base_url: String,
    fetch_timeout: Duration,
    client: reqwest::Client,
}

impl HttpCorpusSource {
    /// Create a source rooted at a base URL
    pub fn new(base_url: impl Into<String>, fetch_timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetch_timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Build the URL of a resource
    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_start_matches('/'))
    }

    async fn fetch_inner(&self, resource: &str) -> Result<String, ContentError> {
        let url = self.resource_url(resource);
        debug!(%url, "Fetching corpus resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ContentError::corpus(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::corpus(resource, format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| ContentError::corpus(resource, e))
    }
}

#[async_trait]
impl CorpusSource for HttpCorpusSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, resource: &str) -> Result<String, ContentError> {
        timeout(self.fetch_timeout, self.fetch_inner(resource))
            .await
            .map_err(|_| {
                ContentError::corpus(resource, format!("timed out after {:?}", self.fetch_timeout))
            })?
    }
}

/// Reads resources from `<root>/<resource>`
pub struct FsCorpusSource {
    root: PathBuf,
}

impl FsCorpusSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CorpusSource for FsCorpusSource {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn fetch(&self, resource: &str) -> Result<String, ContentError> {
        let path = self.root.join(resource);
        debug!(path = %path.display(), "Reading corpus resource");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ContentError::corpus(resource, format!("{}: {}", path.display(), e)))
    }
}
