//! Common types for checkers

use crate::data::CheckerData;

/// Kind of external source a checker handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    /// First link matching a pattern on a web page
    Scrape,
    /// URL that always redirects to the latest artifact
    RotatingUrl,
    /// Newest package in a Debian repository index
    DebianRepo,
    /// The URL itself, checked for existence and content
    Url,
}

impl CheckerKind {
    /// Returns the `type` value selecting this kind in checker data
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckerKind::Scrape => "scrape",
            CheckerKind::RotatingUrl => "rotating-url",
            CheckerKind::DebianRepo => "debian-repo",
            CheckerKind::Url => "url",
        }
    }

    /// Selects the kind for a checker data blob
    ///
    /// Items without a `type` are checked as plain URLs. Unrecognized or
    /// non-string types select nothing.
    pub fn of(data: &CheckerData) -> Option<CheckerKind> {
        match data.get("type") {
            None => Some(CheckerKind::Url),
            Some(_) => data.kind()?.parse().ok(),
        }
    }
}

impl std::str::FromStr for CheckerKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scrape" => Ok(CheckerKind::Scrape),
            "rotating-url" => Ok(CheckerKind::RotatingUrl),
            "debian-repo" => Ok(CheckerKind::DebianRepo),
            "url" => Ok(CheckerKind::Url),
            _ => Err(()),
        }
    }
}
