//! Manifest loading
//!
//! - [`flatpak`]: reads external data items from Flatpak-style JSON manifests
//! - [`error`]: manifest error types

pub mod error;
pub mod flatpak;

pub use error::ManifestError;
pub use flatpak::{load_manifest, parse_manifest};
