//! Sources for the raw configuration document.

use crate::error::FetchError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Retrieves the raw source document for the live-parse path.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<String, FetchError>;

    fn name(&self) -> &'static str;
}

/// Fetches over HTTP(S). Any non-success status is an error.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let response = self.client.get(location).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    fn name(&self) -> &'static str {
        "HttpFetcher"
    }
}

/// Reads documents from the local filesystem, relative to a base directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base_path: PathBuf,
}

impl FileFetcher {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }
}

impl Default for FileFetcher {
    fn default() -> Self {
        Self::new(".")
    }
}

#[async_trait]
impl DocumentFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let path = self.base_path.join(location);
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(path.display().to_string())
            } else {
                FetchError::Io(e)
            }
        })
    }

    fn name(&self) -> &'static str {
        "FileFetcher"
    }
}

/// Picks the fetcher matching a location: HTTP(S) URLs go over the network,
/// everything else is read from disk relative to the working directory.
pub fn fetcher_for(location: &str) -> Box<dyn DocumentFetcher> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpFetcher::new())
    } else {
        Box::new(FileFetcher::default())
    }
}
