//! # Surface Error Types
//!
//! Neither error ever aborts a card: asset failures degrade to the fallback
//! panel and config failures are reported once at startup.

use std::path::PathBuf;

use thiserror::Error;

/// Art loading failures, as reported by an [`crate::ArtLoader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// No asset at the path.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Asset exists but could not be decoded.
    #[error("failed to decode {path}: {reason}")]
    Decode {
        /// Requested path.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// The loader dropped the request without answering.
    #[error("art loader disconnected before answering")]
    Disconnected,
}

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid TOML for [`crate::RendererConfig`].
    #[error("failed to parse {origin}: {source}")]
    Parse {
        /// File path, or `<string>`.
        origin: String,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid configuration: {field} {reason}")]
    Invalid {
        /// Offending key.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
