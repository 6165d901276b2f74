//! Parser for Debian repository `Packages` indexes

use std::collections::HashMap;

use crate::debian::version::compare_versions;

/// One binary package stanza of a `Packages` index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub package: String,
    pub version: String,
    pub architecture: String,
    /// Path of the `.deb` relative to the repository root
    pub filename: String,
    pub size: Option<u64>,
    pub sha256: Option<String>,
}

/// Parse every complete stanza of a `Packages` index
///
/// Stanzas lacking `Package`, `Version`, `Architecture` or `Filename` are
/// skipped. Continuation lines (multi-line descriptions) are ignored.
pub fn parse_packages(content: &str) -> Vec<PackageEntry> {
    content
        .split("\n\n")
        .filter_map(|stanza| parse_stanza(stanza.trim_matches('\n')))
        .collect()
}

fn parse_stanza(stanza: &str) -> Option<PackageEntry> {
    let fields: HashMap<&str, &str> = stanza
        .lines()
        .filter(|line| !line.starts_with([' ', '\t']))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    Some(PackageEntry {
        package: fields.get("Package")?.to_string(),
        version: fields.get("Version")?.to_string(),
        architecture: fields.get("Architecture")?.to_string(),
        filename: fields.get("Filename")?.to_string(),
        size: fields.get("Size").and_then(|s| s.parse().ok()),
        sha256: fields.get("SHA256").map(|s| s.to_ascii_lowercase()),
    })
}

/// Find the newest entry for `package` built for `arch` or for all architectures
///
/// On equal versions the later stanza wins.
pub fn find_latest<'a>(
    entries: &'a [PackageEntry],
    package: &str,
    arch: &str,
) -> Option<&'a PackageEntry> {
    entries
        .iter()
        .filter(|e| e.package == package)
        .filter(|e| e.architecture == arch || e.architecture == "all")
        .max_by(|a, b| compare_versions(&a.version, &b.version))
}
