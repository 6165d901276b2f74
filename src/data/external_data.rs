//! Checked records and the outcome of a check

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::checker::error::ConfigError;
use crate::data::version_info::VersionInfo;

/// Outcome classification of one check pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Not decided yet, or a newer URL exists while the pin presumably still works
    #[default]
    Unknown,
    /// The pin is still correct
    Valid,
    /// The pin is stale or unreachable
    Broken,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Unknown => "unknown",
            State::Valid => "valid",
            State::Broken => "broken",
        }
    }
}

/// Kind of manifest source a pin was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    ExtraData,
    File,
    Archive,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::ExtraData => "extra-data",
            SourceKind::File => "file",
            SourceKind::Archive => "archive",
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extra-data" => Ok(SourceKind::ExtraData),
            "file" => Ok(SourceKind::File),
            "archive" => Ok(SourceKind::Archive),
            _ => Err(()),
        }
    }
}

/// Per-item configuration describing how to look up the artifact's current truth
///
/// Holds the `type` discriminator plus whatever keys the selected checker reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckerData(IndexMap<String, serde_json::Value>);

impl CheckerData {
    pub fn new(entries: IndexMap<String, serde_json::Value>) -> Self {
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `type` discriminator, if present and a string
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(|v| v.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: &str, value: serde_json::Value) {
        self.0.insert(key.to_string(), value);
    }

    /// Returns the string value of `key`, or `None` when the key is absent
    ///
    /// A present key holding a non-string value is a configuration error.
    pub fn optional_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                reason: format!("expected a string, found {}", other),
            }),
        }
    }

    /// Returns the string value of `key`, failing when it is missing
    pub fn require_str(&self, key: &str) -> Result<&str, ConfigError> {
        self.optional_str(key)?
            .ok_or_else(|| ConfigError::MissingKey {
                kind: self.kind().unwrap_or("url").to_string(),
                key: key.to_string(),
            })
    }
}

impl From<serde_json::Value> for CheckerData {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self(map.into_iter().collect()),
            _ => Self::default(),
        }
    }
}

/// A pinned external artifact together with the result of checking it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalData {
    /// Name of the manifest module declaring the source
    pub module: String,
    /// File name the artifact is stored under
    pub filename: String,
    pub kind: SourceKind,
    pub checker_data: CheckerData,
    pub current_version: VersionInfo,
    pub state: State,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_version: Option<VersionInfo>,
}

impl ExternalData {
    pub fn new(
        module: impl Into<String>,
        filename: impl Into<String>,
        kind: SourceKind,
        checker_data: CheckerData,
        current_version: VersionInfo,
    ) -> Self {
        Self {
            module: module.into(),
            filename: filename.into(),
            kind,
            checker_data,
            current_version,
            state: State::Unknown,
            new_version: None,
        }
    }

    /// Merge a check outcome into this record
    pub fn apply(&mut self, outcome: CheckOutcome) {
        self.state = outcome.state;
        self.new_version = outcome.new_version;
    }

    pub fn has_update(&self) -> bool {
        self.new_version.is_some()
    }
}

/// Result of checking one item, merged into the record by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub state: State,
    pub new_version: Option<VersionInfo>,
}

impl CheckOutcome {
    /// Outcome of a checker that did not apply to the item
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn valid() -> Self {
        Self {
            state: State::Valid,
            new_version: None,
        }
    }

    /// Discovery found nothing usable
    pub fn broken() -> Self {
        Self {
            state: State::Broken,
            new_version: None,
        }
    }
}

/// Reconcile a discovered candidate against the pinned version
///
/// `discovered_url` is the link the checker found (a scraped href, a
/// resolved redirect target, an index entry). When the candidate differs
/// from the pin, the item is only marked broken if that link is the pinned
/// URL itself; a different URL leaves the state unknown since the old pin
/// may still be served.
pub fn reconcile(current: &VersionInfo, candidate: VersionInfo, discovered_url: &str) -> CheckOutcome {
    if current.matches(&candidate) {
        return CheckOutcome::valid();
    }

    let state = if current.url == discovered_url {
        State::Broken
    } else {
        State::Unknown
    };

    CheckOutcome {
        state,
        new_version: Some(candidate),
    }
}
