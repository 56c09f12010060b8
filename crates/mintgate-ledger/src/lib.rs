//! Consumption ledgers for mintgate
//!
//! A consumption ledger is the replay-prevention side of a minting tree: the
//! set of leaf digests whose proofs have already been used. It grows
//! monotonically within a tree epoch and is reset only when the tree's root
//! is superseded.
//!
//! The only write operation, [`ConsumptionLedger::record`], is an atomic
//! check-and-insert: when several callers race on the same digest, exactly
//! one succeeds and the rest observe [`Error::AlreadyConsumed`].
//!
//! Two implementations are provided:
//!
//! - [`InMemoryLedger`]: process-local, for tests and single-process gateways
//! - [`FileSystemLedger`]: append-only digest log on disk, bound to the root
//!   it was opened for, surviving process restarts
//!
//! # Example
//!
//! ```
//! use mintgate_ledger::{ConsumptionLedger, InMemoryLedger};
//! use mintgate_types::Digest;
//!
//! # async fn example() -> Result<(), mintgate_ledger::Error> {
//! let ledger = InMemoryLedger::new();
//! let digest = Digest::from_bytes([7u8; 32]);
//!
//! ledger.record(digest).await?;
//! assert!(ledger.is_consumed(digest).await?);
//! assert!(ledger.record(digest).await.is_err());
//! # Ok(())
//! # }
//! ```

mod error;
mod filesystem;
mod memory;

pub use error::{Error, Result};
pub use filesystem::FileSystemLedger;
pub use memory::InMemoryLedger;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use mintgate_types::Digest;

/// Trait for consumption ledgers
///
/// Implementations can provide different storage backends (memory, disk)
/// while maintaining the same atomicity contract on `record`.
pub trait ConsumptionLedger: Send + Sync {
    /// Whether a digest has already been consumed in this epoch
    fn is_consumed(&self, digest: Digest) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + '_>>;

    /// Atomically record a digest as consumed
    ///
    /// Returns `Err(Error::AlreadyConsumed)` if the digest is already
    /// present. Under concurrent invocation with the same digest, exactly
    /// one caller succeeds.
    fn record(&self, digest: Digest) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Number of consumed digests in this epoch
    fn len(&self) -> Pin<Box<dyn Future<Output = Result<usize>> + Send + '_>>;

    /// Whether nothing has been consumed yet
    fn is_empty(&self) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + '_>> {
        Box::pin(async move { Ok(self.len().await? == 0) })
    }

    /// Administrative reset, valid only when the tree's root is superseded
    fn reset(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

impl<T: ConsumptionLedger + ?Sized> ConsumptionLedger for Arc<T> {
    fn is_consumed(&self, digest: Digest) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + '_>> {
        (**self).is_consumed(digest)
    }

    fn record(&self, digest: Digest) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        (**self).record(digest)
    }

    fn len(&self) -> Pin<Box<dyn Future<Output = Result<usize>> + Send + '_>> {
        (**self).len()
    }

    fn reset(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        (**self).reset()
    }
}

impl ConsumptionLedger for Box<dyn ConsumptionLedger> {
    fn is_consumed(&self, digest: Digest) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + '_>> {
        (**self).is_consumed(digest)
    }

    fn record(&self, digest: Digest) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        (**self).record(digest)
    }

    fn len(&self) -> Pin<Box<dyn Future<Output = Result<usize>> + Send + '_>> {
        (**self).len()
    }

    fn reset(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        (**self).reset()
    }
}
