//! Debian repository support
//!
//! - [`index`]: `Packages` index parsing and newest-entry lookup
//! - [`version`]: dpkg version ordering

pub mod index;
pub mod version;

pub use index::{PackageEntry, find_latest, parse_packages};
pub use version::{DebianVersion, compare_versions};
