//! Error types for the confkey key-name engine.

use thiserror::Error;

/// Result type alias for name operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for key name operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid key name: {0}")]
    InvalidName(String),

    #[error("key name is read-only, the key was indexed by a collection")]
    ReadOnlyName,

    #[error("key has no name")]
    MissingName,

    #[error("key name has only a root level, there is no base name")]
    NoBaseName,
}
