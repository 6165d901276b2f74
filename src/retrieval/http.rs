//! reqwest-backed retriever

use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::data::VersionInfo;
use crate::retrieval::error::RetrievalError;
use crate::retrieval::retriever::Retriever;

/// Retriever implementation over HTTP(S)
#[derive(Clone)]
pub struct HttpRetriever {
    client: reqwest::Client,
}

impl HttpRetriever {
    /// Creates a new HttpRetriever with the given client settings
    pub fn new(config: &HttpConfig) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, RetrievalError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("{} returned status {}", url, status);
            return Err(RetrievalError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl Retriever for HttpRetriever {
    async fn fetch_text(&self, url: &str) -> Result<String, RetrievalError> {
        let response = self.get(url).await?;

        response.text().await.map_err(|e| RetrievalError::InvalidResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, RetrievalError> {
        let response = self.get(url).await?;
        let body = response.bytes().await?;

        Ok(body.to_vec())
    }

    async fn resolve(&self, url: &str) -> Result<VersionInfo, RetrievalError> {
        let mut response = self.get(url).await?;
        let resolved_url = response.url().to_string();

        let mut hasher = Sha256::new();
        let mut size: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            hasher.update(&chunk);
            size += chunk.len() as u64;
        }
        let checksum = hex::encode(hasher.finalize());

        debug!("Resolved {} -> {} ({} bytes)", url, resolved_url, size);

        Ok(VersionInfo::new(resolved_url, Some(checksum), Some(size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn retriever() -> HttpRetriever {
        HttpRetriever::new(&HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn resolve_computes_checksum_and_size() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/app-1.0.tar.gz")
            .with_status(200)
            .with_body("hello")
            .create_async()
            .await;

        let url = format!("{}/app-1.0.tar.gz", server.url());
        let result = retriever().resolve(&url).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            VersionInfo::new(url, Some(HELLO_SHA256.to_string()), Some(5))
        );
    }

    #[tokio::test]
    async fn resolve_follows_redirects() {
        let mut server = Server::new_async().await;
        let target = format!("{}/app-2.0.tar.gz", server.url());

        let redirect = server
            .mock("GET", "/latest")
            .with_status(302)
            .with_header("location", &target)
            .create_async()
            .await;
        let file = server
            .mock("GET", "/app-2.0.tar.gz")
            .with_status(200)
            .with_body("hello")
            .create_async()
            .await;

        let result = retriever()
            .resolve(&format!("{}/latest", server.url()))
            .await
            .unwrap();

        redirect.assert_async().await;
        file.assert_async().await;
        assert_eq!(result.url, target);
        assert_eq!(result.checksum.as_deref(), Some(HELLO_SHA256));
    }

    #[tokio::test]
    async fn resolve_returns_status_error_for_missing_file() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/gone.tar.gz")
            .with_status(404)
            .create_async()
            .await;

        let result = retriever()
            .resolve(&format!("{}/gone.tar.gz", server.url()))
            .await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(err, RetrievalError::Status { status: 404, .. }));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn fetch_text_returns_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/downloads.html")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<a href=\"x\">x</a>")
            .create_async()
            .await;

        let result = retriever()
            .fetch_text(&format!("{}/downloads.html", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, "<a href=\"x\">x</a>");
    }

    #[tokio::test]
    async fn fetch_bytes_reports_server_errors() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/Packages.gz")
            .with_status(500)
            .create_async()
            .await;

        let result = retriever()
            .fetch_bytes(&format!("{}/Packages.gz", server.url()))
            .await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(err, RetrievalError::Status { status: 500, .. }));
        assert!(!err.is_unavailable());
    }

    #[tokio::test]
    async fn network_failure_is_not_unavailable() {
        // Nothing listens on port 9 of the loopback interface
        let result = retriever().fetch_text("http://127.0.0.1:9/").await;

        let err = result.unwrap_err();
        assert!(matches!(err, RetrievalError::Network(_)));
        assert!(!err.is_unavailable());
    }
}
