//! Flatpak-style JSON manifest reader
//!
//! Collects every `extra-data`, `file` and `archive` source with a URL from
//! the module tree:
//!
//! ```json
//! {
//!     "modules": [{
//!         "name": "app",
//!         "sources": [{
//!             "type": "extra-data",
//!             "filename": "app.tar.gz",
//!             "url": "https://example.com/app-1.0.tar.gz",
//!             "sha256": "...",
//!             "size": 1024,
//!             "x-checker-data": { "type": "scrape", "url": "...", "pattern": "..." }
//!         }]
//!     }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::data::{CheckerData, ExternalData, SourceKind, VersionInfo};
use crate::manifest::error::ManifestError;

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    modules: Vec<RawEntry<RawModule>>,
}

/// Manifests may reference modules and sources kept in separate files
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry<T> {
    Reference(String),
    Inline(T),
}

#[derive(Debug, Deserialize)]
struct RawModule {
    name: String,
    #[serde(default)]
    sources: Vec<RawEntry<RawSource>>,
    #[serde(default)]
    modules: Vec<RawEntry<RawModule>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawSource {
    #[serde(rename = "type")]
    kind: String,
    url: Option<String>,
    sha256: Option<String>,
    size: Option<u64>,
    filename: Option<String>,
    dest_filename: Option<String>,
    #[serde(default)]
    only_arches: Vec<String>,
    #[serde(rename = "x-checker-data")]
    checker_data: Option<serde_json::Value>,
}

/// Read and parse the manifest at `path`
pub fn load_manifest(path: &Path) -> Result<Vec<ExternalData>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&content)
}

/// Extract the external data items of a manifest, in declaration order
pub fn parse_manifest(content: &str) -> Result<Vec<ExternalData>, ManifestError> {
    let manifest: RawManifest = serde_json::from_str(content)?;
    let mut items = Vec::new();
    collect_modules(&manifest.modules, &mut items);
    Ok(items)
}

fn collect_modules(modules: &[RawEntry<RawModule>], items: &mut Vec<ExternalData>) {
    for entry in modules {
        match entry {
            RawEntry::Reference(path) => debug!("Skipping module reference {}", path),
            RawEntry::Inline(module) => {
                for source in &module.sources {
                    match source {
                        RawEntry::Reference(path) => debug!("Skipping source reference {}", path),
                        RawEntry::Inline(source) => {
                            if let Some(item) = to_external_data(&module.name, source) {
                                items.push(item);
                            }
                        }
                    }
                }
                collect_modules(&module.modules, items);
            }
        }
    }
}

fn to_external_data(module: &str, source: &RawSource) -> Option<ExternalData> {
    let kind: SourceKind = source.kind.parse().ok()?;
    let url = source.url.as_deref()?;

    let filename = source
        .filename
        .clone()
        .or_else(|| source.dest_filename.clone())
        .unwrap_or_else(|| filename_from_url(url));

    let mut checker_data = source
        .checker_data
        .clone()
        .map(CheckerData::from)
        .unwrap_or_default();
    if checker_data.kind() == Some("debian-repo")
        && checker_data.get("arch").is_none()
        && let Some(arch) = source.only_arches.first().and_then(|a| debian_arch(a))
    {
        checker_data.insert("arch", serde_json::Value::from(arch));
    }

    Some(ExternalData::new(
        module,
        filename,
        kind,
        checker_data,
        VersionInfo::new(
            url,
            source.sha256.as_ref().map(|s| s.to_ascii_lowercase()),
            source.size,
        ),
    ))
}

fn filename_from_url(url: &str) -> String {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').find(|segment| !segment.is_empty()))
        .unwrap_or(url)
        .to_string()
}

/// Map a Flatpak architecture name to the Debian one
fn debian_arch(flatpak_arch: &str) -> Option<&'static str> {
    match flatpak_arch {
        "x86_64" => Some("amd64"),
        "aarch64" => Some("arm64"),
        "i386" => Some("i386"),
        "arm" => Some("armhf"),
        _ => None,
    }
}
