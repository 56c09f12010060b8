//! Error types for mintgate-ledger

use thiserror::Error;

/// Errors that can occur in consumption ledger operations
#[derive(Error, Debug)]
pub enum Error {
    /// The digest was already recorded in this epoch
    ///
    /// A hard error, never a no-op: exactly one caller may win a
    /// check-and-insert, and every loser must see this.
    #[error("Already consumed: {0}")]
    AlreadyConsumed(String),

    /// I/O error from a persistent ledger backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error (epoch metadata)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Corrupt ledger contents on disk
    #[error("Corrupt ledger: {0}")]
    Corrupt(String),
}

/// Result type for consumption ledger operations
pub type Result<T> = std::result::Result<T, Error>;
