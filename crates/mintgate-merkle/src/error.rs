//! Error types for mintgate-merkle

use thiserror::Error;

/// Errors that can occur in Merkle tree operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid proof format
    #[error("Invalid proof: {0}")]
    InvalidProof(String),

    /// Root is empty or unset
    #[error("Empty root: {0}")]
    EmptyRoot(String),

    /// Root mismatch after folding the proof path
    #[error("Root mismatch: expected {expected}, got {actual}")]
    RootMismatch { expected: String, actual: String },

    /// Invalid leaf index
    #[error("Invalid leaf index: {0}")]
    InvalidLeafIndex(String),

    /// Tree has no leaves
    #[error("Empty tree: {0}")]
    EmptyTree(String),

    /// Identity record could not be canonically encoded
    #[error("Encoding error: {0}")]
    Encoding(#[from] mintgate_types::Error),
}

/// Result type for Merkle tree operations
pub type Result<T> = std::result::Result<T, Error>;
