//! Error types for platform fact collection.

use std::path::PathBuf;

/// A raw platform identifier could not be turned into a fact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectError {
    /// The value of `field` is unrecognized or contradicts another field.
    #[error("invalid platform: {field} = '{value}'")]
    InvalidPlatform {
        /// Name of the offending field (e.g. `hostFamily`).
        field: &'static str,
        /// The raw value as supplied.
        value: String,
    },
}

impl CollectError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        CollectError::InvalidPlatform {
            field,
            value: value.into(),
        }
    }
}

/// Errors that can occur while loading or saving environment descriptions.
#[derive(Debug, thiserror::Error)]
pub enum FactsError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing description files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Description file not found.
    #[error("environment file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The description parsed but does not describe a valid platform.
    #[error(transparent)]
    Collect(#[from] CollectError),
}

/// Result type for description file operations.
pub type Result<T> = std::result::Result<T, FactsError>;
