//! Error types for mintgate-types

use thiserror::Error;

/// Errors that can occur in mintgate-types
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding error
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Invalid or malformed encoding (hex, digest length, identity fields)
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Invalid recipient address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The zero address is not a valid recipient
    #[error("Zero address not allowed")]
    ZeroAddress,

    /// Invalid tree kind discriminant
    #[error("Invalid tree kind: {0}")]
    InvalidTreeKind(u8),
}

/// Result type for mintgate-types operations
pub type Result<T> = std::result::Result<T, Error>;
