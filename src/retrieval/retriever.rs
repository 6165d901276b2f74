//! Retriever trait for reading remote content and artifact metadata

#[cfg(test)]
use mockall::automock;

use crate::data::VersionInfo;
use crate::retrieval::error::RetrievalError;

/// Network-facing capability the checkers depend on
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    /// Fetches a page or index as text
    async fn fetch_text(&self, url: &str) -> Result<String, RetrievalError>;

    /// Fetches raw bytes (compressed indexes and the like)
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, RetrievalError>;

    /// Follows redirects and computes the checksum and size of the content
    ///
    /// # Returns
    /// * `Ok(VersionInfo)` - Final URL after redirects, SHA-256 hex digest, byte count
    /// * `Err(RetrievalError)` - If the server reports an error or the transfer fails
    async fn resolve(&self, url: &str) -> Result<VersionInfo, RetrievalError>;
}
