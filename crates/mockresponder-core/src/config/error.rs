//! Error types for fixture loading.

use std::fmt;
use std::path::PathBuf;

/// Fixture loading error
#[derive(Debug)]
pub enum ConfigError {
    /// JSON parsing error
    Json(serde_json::Error),
    /// YAML parsing error
    Yaml(serde_yaml::Error),
    /// Unknown file type
    UnknownFileType(String),
    /// File could not be read
    Io(std::io::Error),
    /// Malformed glob pattern
    Pattern(glob::PatternError),
    /// Glob pattern matched no files
    NoMatches(String),
    /// Entry `index` of a fixture file is inconsistent
    InvalidFixture {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "JSON parsing error: {}", e),
            ConfigError::Yaml(e) => write!(f, "YAML parsing error: {}", e),
            ConfigError::UnknownFileType(path) => write!(f, "Unknown file type: {}", path),
            ConfigError::Io(e) => write!(f, "Fixture read error: {}", e),
            ConfigError::Pattern(e) => write!(f, "Invalid fixture pattern: {}", e),
            ConfigError::NoMatches(pattern) => write!(f, "No fixture files match: {}", pattern),
            ConfigError::InvalidFixture {
                path,
                index,
                reason,
            } => write!(
                f,
                "Invalid fixture {} in {}: {}",
                index,
                path.display(),
                reason
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<glob::PatternError> for ConfigError {
    fn from(err: glob::PatternError) -> Self {
        ConfigError::Pattern(err)
    }
}

impl From<glob::GlobError> for ConfigError {
    fn from(err: glob::GlobError) -> Self {
        ConfigError::Io(err.into())
    }
}
