//! Chapter content: where raw Markdown comes from and how it becomes blocks.
//!
//! A [`ContentSource`] resolves manifest-relative file names to text. The
//! directory source reads from disk; the HTTP source fetches with a
//! cache-busting query parameter so edited chapters are picked up on reload.

mod blocks;

pub use blocks::{BlockKind, ContentNode, render_blocks};

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{path} not found")]
    NotFound { path: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Supplies raw chapter and manifest text by manifest-relative name.
pub trait ContentSource {
    fn describe(&self) -> String;
    fn fetch(&self, file: &str) -> Result<String, ContentError>;
}

/// Reads files below a root directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSource { root: root.into() }
    }
}

impl ContentSource for DirSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn fetch(&self, file: &str) -> Result<String, ContentError> {
        let path = self.root.join(file);
        debug!(path = %path.display(), "Reading content file");
        fs::read_to_string(&path).map_err(|source| {
            let path = path.display().to_string();
            if source.kind() == ErrorKind::NotFound {
                ContentError::NotFound { path }
            } else {
                ContentError::Io { path, source }
            }
        })
    }
}

/// Fetches files relative to an `http(s)://` base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base: &str) -> Self {
        HttpSource {
            base: base.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url_for(&self, file: &str) -> String {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        format!("{}/{}?t={stamp}", self.base, file.trim_start_matches('/'))
    }
}

impl ContentSource for HttpSource {
    fn describe(&self) -> String {
        self.base.clone()
    }

    fn fetch(&self, file: &str) -> Result<String, ContentError> {
        let url = self.url_for(file);
        debug!(%url, "Fetching content");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ContentError::Http {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ContentError::NotFound { path: url });
        }
        if !status.is_success() {
            return Err(ContentError::Status {
                url,
                status: status.as_u16(),
            });
        }
        response
            .text()
            .map_err(|source| ContentError::Http { url, source })
    }
}

/// Pick a source for a configured docs root: URLs go over HTTP, anything
/// else is treated as a directory.
pub fn open_source(docs_root: &str) -> Box<dyn ContentSource> {
    if docs_root.starts_with("http://") || docs_root.starts_with("https://") {
        Box::new(HttpSource::new(docs_root))
    } else {
        Box::new(DirSource::new(docs_root))
    }
}
