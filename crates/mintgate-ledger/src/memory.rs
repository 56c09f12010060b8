//! In-memory consumption ledger

use std::collections::HashSet;
use std::pin::Pin;
use std::sync::Arc;

use mintgate_types::Digest;
use tokio::sync::Mutex;

use crate::{ConsumptionLedger, Error, Result};

/// In-memory consumption ledger
///
/// Holds the consumed set behind a single async mutex, so the
/// check-and-insert in `record` is serialized: one winner per digest.
/// Fast but not persistent across process restarts.
///
/// Cloning is cheap and clones share the same underlying set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    consumed: Arc<Mutex<HashSet<Digest>>>,
}

impl InMemoryLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConsumptionLedger for InMemoryLedger {
    fn is_consumed(
        &self,
        digest: Digest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<bool>> + Send + '_>> {
        Box::pin(async move { Ok(self.consumed.lock().await.contains(&digest)) })
    }

    fn record(&self, digest: Digest) -> Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let mut consumed = self.consumed.lock().await;
            if !consumed.insert(digest) {
                return Err(Error::AlreadyConsumed(digest.to_hex_prefixed()));
            }
            Ok(())
        })
    }

    fn len(&self) -> Pin<Box<dyn std::future::Future<Output = Result<usize>> + Send + '_>> {
        Box::pin(async move { Ok(self.consumed.lock().await.len()) })
    }

    fn reset(&self) -> Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.consumed.lock().await.clear();
            Ok(())
        })
    }
}
