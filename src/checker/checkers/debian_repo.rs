//! Checker for packages published in a Debian repository
//!
//! Checker data:
//!
//! ```json
//! {
//!     "type": "debian-repo",
//!     "root": "https://repo.example.com/apt",
//!     "dist": "stable",
//!     "component": "main",
//!     "package-name": "example-app",
//!     "arch": "amd64"
//! }
//! ```
//!
//! The candidate comes straight from the `Packages` index (filename, size
//! and SHA-256), so the `.deb` itself is never downloaded.

use std::io::Read;
use std::sync::Arc;

use flate2::read::GzDecoder;
use tracing::{debug, warn};

use crate::checker::error::CheckError;
use crate::checker::traits::Checker;
use crate::checker::types::CheckerKind;
use crate::data::{CheckOutcome, ExternalData, VersionInfo, reconcile};
use crate::debian::{find_latest, parse_packages};
use crate::retrieval::{RetrievalError, Retriever};

pub struct DebianRepoChecker {
    retriever: Arc<dyn Retriever>,
    default_arch: String,
}

impl DebianRepoChecker {
    /// Creates a checker falling back to `default_arch` when checker data has no `arch`
    pub fn new(retriever: Arc<dyn Retriever>, default_arch: &str) -> Self {
        Self {
            retriever,
            default_arch: default_arch.to_string(),
        }
    }

    /// Fetch the index, preferring the gzip variant
    ///
    /// Returns None when the repository has neither. Server errors on either
    /// variant propagate.
    async fn fetch_index(&self, index_url: &str) -> Result<Option<String>, CheckError> {
        let gz_url = format!("{}.gz", index_url);

        match self.retriever.fetch_bytes(&gz_url).await {
            Ok(bytes) => return Ok(Some(decode_gzip(&gz_url, &bytes)?)),
            Err(e) if e.is_unavailable() => {
                debug!("{} unavailable ({}), trying uncompressed index", gz_url, e);
            }
            Err(e) => return Err(e.into()),
        }

        match self.retriever.fetch_text(index_url).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.is_unavailable() => {
                warn!("Could not fetch package index {}: {}", index_url, e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl Checker for DebianRepoChecker {
    fn kind(&self) -> CheckerKind {
        CheckerKind::DebianRepo
    }

    async fn discover(&self, data: &ExternalData) -> Result<CheckOutcome, CheckError> {
        let checker_data = &data.checker_data;
        let root = checker_data.require_str("root")?.trim_end_matches('/');
        let dist = checker_data.require_str("dist")?;
        let component = checker_data.require_str("component")?;
        let package = checker_data.require_str("package-name")?;
        let arch = checker_data
            .optional_str("arch")?
            .unwrap_or(self.default_arch.as_str());

        let index_url = format!(
            "{}/dists/{}/{}/binary-{}/Packages",
            root, dist, component, arch
        );
        debug!("Searching for {} ({}) in {}", package, arch, index_url);

        let Some(index) = self.fetch_index(&index_url).await? else {
            return Ok(CheckOutcome::broken());
        };

        let entries = parse_packages(&index);
        let Some(entry) = find_latest(&entries, package, arch) else {
            warn!("Package {} ({}) not found in {}", package, arch, index_url);
            return Ok(CheckOutcome::broken());
        };

        let candidate = VersionInfo::new(
            format!("{}/{}", root, entry.filename.trim_start_matches('/')),
            entry.sha256.clone(),
            entry.size,
        );
        debug!("Newest {} is {} at {}", package, entry.version, candidate.url);

        let discovered = candidate.url.clone();
        Ok(reconcile(&data.current_version, candidate, &discovered))
    }
}

fn decode_gzip(url: &str, bytes: &[u8]) -> Result<String, RetrievalError> {
    let mut content = String::new();
    GzDecoder::new(bytes)
        .read_to_string(&mut content)
        .map_err(|e| RetrievalError::InvalidResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    Ok(content)
}
