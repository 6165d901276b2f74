//! Retriever test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use extdata_checker::data::VersionInfo;
use extdata_checker::retrieval::{RetrievalError, Retriever};

/// Stub retriever serving canned pages and resolutions
///
/// Unknown URLs answer with HTTP 404.
#[derive(Default)]
pub struct StubRetriever {
    pages: HashMap<String, String>,
    files: HashMap<String, VersionInfo>,
    failing: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StubRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Serve `url`, resolving to `resolved_url` with the given checksum and size
    pub fn with_file(mut self, url: &str, resolved_url: &str, checksum: &str, size: u64) -> Self {
        self.files.insert(
            url.to_string(),
            VersionInfo::new(resolved_url, Some(checksum.to_string()), Some(size)),
        );
        self
    }

    /// Make requests for `url` fail as a transport error
    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.failing.insert(url.to_string(), reason.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, url: &str) -> Result<(), RetrievalError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.failing.get(url) {
            Some(reason) => Err(RetrievalError::InvalidResponse {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(url: &str) -> RetrievalError {
    RetrievalError::Status {
        url: url.to_string(),
        status: 404,
    }
}

#[async_trait]
impl Retriever for StubRetriever {
    async fn fetch_text(&self, url: &str) -> Result<String, RetrievalError> {
        self.record(url)?;
        self.pages.get(url).cloned().ok_or_else(|| not_found(url))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, RetrievalError> {
        self.fetch_text(url).await.map(String::into_bytes)
    }

    async fn resolve(&self, url: &str) -> Result<VersionInfo, RetrievalError> {
        self.record(url)?;
        self.files.get(url).cloned().ok_or_else(|| not_found(url))
    }
}
