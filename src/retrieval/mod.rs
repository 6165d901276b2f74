//! Retrieval of remote content for checkers
//!
//! - [`retriever`]: the `Retriever` trait checkers are written against
//! - [`http`]: reqwest-backed implementation
//! - [`error`]: retrieval error types

pub mod error;
pub mod http;
pub mod retriever;

pub use error::RetrievalError;
pub use http::HttpRetriever;
pub use retriever::Retriever;
