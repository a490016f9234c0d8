//! # Rendering Error Types

use thiserror::Error;

/// Errors raised while constructing a GPU effect.
///
/// None of these abort a card: the scene drops the effect and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// The platform lacks a capability the effect needs.
    #[error("effect unsupported: {0}")]
    Unsupported(String),

    /// The shader failed validation.
    #[error("shader compilation failed: {0}")]
    ShaderCompilation(String),

    /// A GPU resource could not be allocated.
    #[error("gpu resource creation failed: {0}")]
    ResourceCreation(String),
}

/// Result type for effect construction.
pub type EffectResult<T> = Result<T, EffectError>;
