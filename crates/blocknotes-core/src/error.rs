//! Error types for BlockNotes Core.

use thiserror::Error;

/// Core errors that can occur while handling primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid visibility value: {0}")]
    InvalidVisibility(u8),

    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
