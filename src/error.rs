use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for bumpkit operations
#[derive(Error, Debug)]
pub enum BumpkitError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Required file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Pin lookup failed: {0}")]
    Pin(String),

    #[error("Invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_bw::Error,
    },

    #[error("Replacement pattern not found in {}: {pattern:?}", path.display())]
    ReplacementNotFound { path: PathBuf, pattern: String },

    #[error("Invalid selection: {0}")]
    Selection(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in bumpkit
pub type Result<T> = std::result::Result<T, BumpkitError>;

impl BumpkitError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpkitError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpkitError::Version(msg.into())
    }

    /// Create a pin lookup error with context
    pub fn pin(msg: impl Into<String>) -> Self {
        BumpkitError::Pin(msg.into())
    }

    /// Create a selection error with context
    pub fn selection(msg: impl Into<String>) -> Self {
        BumpkitError::Selection(msg.into())
    }
}

impl From<semver::Error> for BumpkitError {
    fn from(err: semver::Error) -> Self {
        BumpkitError::Version(err.to_string())
    }
}
