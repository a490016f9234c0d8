//! # Core Error Types

use thiserror::Error;

/// Errors raised at the parsing boundary of the core data model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A size preset name outside `small | normal | large | x-large`.
    #[error("unknown size preset: {0}")]
    UnknownSizePreset(String),

    /// A hex color string that is not `#RRGGBB`.
    #[error("invalid color literal: {0}")]
    InvalidColor(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
