use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Defaults
// =============================================================================

/// Timeout for a single request in milliseconds (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Debian architecture used when checker data does not name one
pub const DEFAULT_DEBIAN_ARCH: &str = "amd64";

/// Number of items checked at the same time
pub const DEFAULT_JOBS: usize = 1;

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// User agent sent with every request
pub fn default_user_agent() -> String {
    format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION"))
}

/// Checker settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub http: HttpConfig,
    pub debian: DebianConfig,
    pub jobs: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            debian: DebianConfig::default(),
            jobs: DEFAULT_JOBS,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
        }
    }
}

/// Debian repository configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DebianConfig {
    pub default_arch: String,
}

impl Default for DebianConfig {
    fn default() -> Self {
        Self {
            default_arch: DEFAULT_DEBIAN_ARCH.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Settings {
    /// Load settings from `path`, or from the default config file when it exists
    ///
    /// An explicitly given path must exist. Without one, missing defaults are fine.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the data directory for extdata-checker.
/// Uses $XDG_DATA_HOME/extdata-checker if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/extdata-checker,
/// or ./extdata-checker if neither is available.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{}.log", APP_NAME))
}

/// Returns the path to the default settings file.
/// Uses $XDG_CONFIG_HOME/extdata-checker/config.json, falling back to ~/.config.
pub fn config_path() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
    .join("config.json")
}

fn dir_with_env(xdg_home: Option<String>, home_dir: Option<PathBuf>, home_fallback: &str) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
