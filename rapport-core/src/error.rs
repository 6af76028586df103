//! Error types for rapport-core

use thiserror::Error;

/// Main error type for the rapport-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Requested contact has no chat history (distinct from a failure:
    /// the batch orchestrator skips these, single-contact queries surface it)
    #[error("no chat history for contact: {0}")]
    NoHistory(String),

    /// Message store error
    #[error("message store error: {0}")]
    Store(String),

    /// Base scorer error
    #[error("scorer error: {0}")]
    Scorer(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for rapport-core
pub type Result<T> = std::result::Result<T, Error>;
