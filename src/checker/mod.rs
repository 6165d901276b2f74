//! Checkers reconciling pinned artifacts with their sources
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Checker   │────▶│  Retriever  │
//! │  (select)   │     │ (discover)  │     │   (fetch)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  reconcile  │
//!                     │(state, new) │
//!                     └─────────────┘
//! ```
//!
//! - [`traits`]: the `Checker` trait
//! - [`types`]: `CheckerKind` discriminator
//! - [`checkers`]: scrape, rotating-url, debian-repo and url implementations
//! - [`registry`]: ordered checker list and first-match dispatch
//! - [`error`]: configuration and check errors

pub mod checkers;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;

pub use error::{CheckError, ConfigError};
pub use registry::{CheckerRegistry, create_default_registry};
pub use traits::Checker;
pub use types::CheckerKind;
