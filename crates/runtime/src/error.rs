use sitecfg_document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Fetching '{location}' returned HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document not found: {0}")]
    NotFound(String),
}

/// Why the live-parse path could not produce a configuration.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
