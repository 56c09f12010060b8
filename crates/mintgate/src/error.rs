//! Error types for mintgate

use thiserror::Error;

/// Errors that can occur in mint gateway operations
#[derive(Error, Debug)]
pub enum Error {
    /// The proof does not authorize the claimed record under the current root
    #[error("Proof invalid: {0}")]
    ProofInvalid(#[from] mintgate_merkle::Error),

    /// The proof was already consumed in this epoch
    #[error("Already consumed: {0}")]
    AlreadyConsumed(String),

    /// The caller's root does not match the gate's current epoch
    #[error("Unknown root: {0}")]
    UnknownRoot(String),

    /// The gateway is paused and rejecting claims
    #[error("Gateway is paused")]
    Paused,

    /// Types error (addresses, tree kinds, wire metadata)
    #[error("Types error: {0}")]
    Types(#[from] mintgate_types::Error),

    /// Ledger backend error
    #[error("Ledger error: {0}")]
    Ledger(mintgate_ledger::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

// Ledger replay errors surface as `AlreadyConsumed` so callers see one
// reason code regardless of backend; everything else stays a ledger error.
impl From<mintgate_ledger::Error> for Error {
    fn from(err: mintgate_ledger::Error) -> Self {
        match err {
            mintgate_ledger::Error::AlreadyConsumed(digest) => Error::AlreadyConsumed(digest),
            other => Error::Ledger(other),
        }
    }
}

/// Result type for mint gateway operations
pub type Result<T> = std::result::Result<T, Error>;
