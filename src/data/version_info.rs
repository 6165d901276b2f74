//! Identity of one artifact instance

use serde::{Deserialize, Serialize};

/// Location, digest, and size of a downloadable artifact
///
/// Checksums are lowercase hex SHA-256 digests. Either may be missing when
/// the manifest or the source did not provide one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl VersionInfo {
    pub fn new(url: impl Into<String>, checksum: Option<String>, size: Option<u64>) -> Self {
        Self {
            url: url.into(),
            checksum,
            size,
        }
    }

    /// Whether `other` describes the same artifact as `self`
    ///
    /// When both sides carry a checksum, the checksums must be equal and the
    /// sizes must agree (a size missing on either side is compatible).
    /// Without checksums on both sides, only the URLs are compared.
    pub fn matches(&self, other: &VersionInfo) -> bool {
        match (&self.checksum, &other.checksum) {
            (Some(ours), Some(theirs)) => {
                ours.eq_ignore_ascii_case(theirs) && sizes_agree(self.size, other.size)
            }
            _ => self.url == other.url,
        }
    }
}

fn sizes_agree(a: Option<u64>, b: Option<u64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}
