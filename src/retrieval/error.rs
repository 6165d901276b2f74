use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },
}

impl RetrievalError {
    /// Whether the server definitively answered that the resource is not there
    ///
    /// Only client errors count, except 408 and 429 which stay faults along
    /// with server errors. Checkers treat an unavailable resource as a stale pin.
    pub fn is_unavailable(&self) -> bool {
        match self {
            RetrievalError::Status { status, .. } => {
                (400..500).contains(status) && !matches!(status, 408 | 429)
            }
            _ => false,
        }
    }
}
