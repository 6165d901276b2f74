//! Freshness checks for externally hosted artifacts pinned in a manifest
//!
//! Each pinned source (URL, checksum, size) is handed to the checker that
//! knows how to find its current truth: a scraped download page, a rotating
//! "latest" URL, a Debian repository index, or the URL itself. The result
//! says whether the pin is still valid, broken, or has a newer replacement.

pub mod checker;
pub mod config;
pub mod data;
pub mod debian;
pub mod manifest;
pub mod report;
pub mod retrieval;
pub mod runner;
