use thiserror::Error;

use crate::retrieval::RetrievalError;

/// Manifest authoring mistakes in checker data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required key '{key}' for checker type '{kind}'")]
    MissingKey { kind: String, key: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Faults a check propagates to its caller
///
/// Expected misses (no match, missing resource) are not errors; they resolve
/// to a broken state instead.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),
}
