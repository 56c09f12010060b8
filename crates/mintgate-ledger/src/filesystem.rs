//! File system based consumption ledger

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mintgate_types::Digest;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::{ConsumptionLedger, Error, Result};

/// Epoch metadata stored alongside the consumed-digest log
#[derive(Debug, Serialize, Deserialize)]
struct EpochMetadata {
    /// The committed root this ledger epoch belongs to
    root: Digest,
    /// When the epoch started
    created_at: DateTime<Utc>,
}

/// File system based consumption ledger
///
/// Persists consumed digests as an append-only log, one hex digest per line,
/// with a companion metadata file binding the ledger to the root it was
/// opened for. Opening against a different root starts a fresh epoch: the
/// log is truncated and the metadata rewritten, which is the only sanctioned
/// way consumption state is ever discarded.
///
/// # Directory Structure
///
/// ```text
/// ledger_dir/
/// ├── consumed.log
/// └── epoch.meta
/// ```
///
/// # Example
///
/// ```no_run
/// use mintgate_ledger::{ConsumptionLedger, FileSystemLedger};
/// use mintgate_types::Digest;
///
/// # async fn example() -> Result<(), mintgate_ledger::Error> {
/// let root = Digest::from_bytes([9u8; 32]);
/// let ledger = FileSystemLedger::open("/var/lib/mintgate/open-tree", root).await?;
///
/// ledger.record(Digest::from_bytes([1u8; 32])).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemLedger {
    dir: PathBuf,
    root: Digest,
    consumed: Arc<Mutex<HashSet<Digest>>>,
}

impl FileSystemLedger {
    /// Open (or create) a ledger in `dir`, bound to `root`
    ///
    /// An existing ledger recorded under the same root is loaded as-is; one
    /// recorded under a different root is superseded by a fresh epoch.
    pub async fn open(dir: impl AsRef<Path>, root: Digest) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;

        let ledger = Self {
            dir,
            root,
            consumed: Arc::new(Mutex::new(HashSet::new())),
        };

        match ledger.read_metadata().await? {
            Some(meta) if meta.root == root => {
                let consumed = ledger.load_log().await?;
                *ledger.consumed.lock().await = consumed;
            }
            // Different root (or first open): fresh epoch
            _ => ledger.start_epoch().await?,
        }

        Ok(ledger)
    }

    /// The root this ledger epoch is bound to
    pub fn root(&self) -> Digest {
        self.root
    }

    fn log_path(&self) -> PathBuf {
        self.dir.join("consumed.log")
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join("epoch.meta")
    }

    async fn read_metadata(&self) -> Result<Option<EpochMetadata>> {
        match fs::read_to_string(self.meta_path()).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_log(&self) -> Result<HashSet<Digest>> {
        let content = match fs::read_to_string(self.log_path()).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e.into()),
        };

        let mut consumed = HashSet::new();
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let digest = Digest::from_hex(line).map_err(|e| {
                Error::Corrupt(format!("line {}: {}", line_num + 1, e))
            })?;
            consumed.insert(digest);
        }
        Ok(consumed)
    }

    /// Truncate the log and rewrite the epoch metadata
    async fn start_epoch(&self) -> Result<()> {
        let meta = EpochMetadata {
            root: self.root,
            created_at: Utc::now(),
        };
        fs::write(self.meta_path(), serde_json::to_string_pretty(&meta)?).await?;
        fs::write(self.log_path(), b"").await?;
        self.consumed.lock().await.clear();
        Ok(())
    }

    /// Append one digest to the log, flushing before the caller's insert
    /// becomes visible
    async fn append(&self, digest: Digest) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())
            .await?;
        file.write_all(format!("{}\n", digest.to_hex()).as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }
}

impl ConsumptionLedger for FileSystemLedger {
    fn is_consumed(
        &self,
        digest: Digest,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<bool>> + Send + '_>> {
        Box::pin(async move { Ok(self.consumed.lock().await.contains(&digest)) })
    }

    fn record(&self, digest: Digest) -> Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            // The lock is held across the append so the on-disk log and the
            // in-memory set can never disagree about the winner.
            let mut consumed = self.consumed.lock().await;
            if consumed.contains(&digest) {
                return Err(Error::AlreadyConsumed(digest.to_hex_prefixed()));
            }
            self.append(digest).await?;
            consumed.insert(digest);
            Ok(())
        })
    }

    fn len(&self) -> Pin<Box<dyn std::future::Future<Output = Result<usize>> + Send + '_>> {
        Box::pin(async move { Ok(self.consumed.lock().await.len()) })
    }

    fn reset(&self) -> Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { self.start_epoch().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mintgate-ledger-{}", name))
    }

    #[tokio::test]
    async fn test_filesystem_record_and_replay() {
        let dir = temp_dir("roundtrip");
        let _ = std::fs::remove_dir_all(&dir);

        let root = Digest::from_bytes([9u8; 32]);
        let ledger = FileSystemLedger::open(&dir, root).await.unwrap();
        let digest = Digest::from_bytes([1u8; 32]);

        assert!(!ledger.is_consumed(digest).await.unwrap());
        ledger.record(digest).await.unwrap();
        assert!(ledger.is_consumed(digest).await.unwrap());
        assert!(matches!(
            ledger.record(digest).await.unwrap_err(),
            Error::AlreadyConsumed(_)
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_filesystem_survives_reopen() {
        let dir = temp_dir("reopen");
        let _ = std::fs::remove_dir_all(&dir);

        let root = Digest::from_bytes([9u8; 32]);
        let digest = Digest::from_bytes([2u8; 32]);

        {
            let ledger = FileSystemLedger::open(&dir, root).await.unwrap();
            ledger.record(digest).await.unwrap();
        }

        let reopened = FileSystemLedger::open(&dir, root).await.unwrap();
        assert!(reopened.is_consumed(digest).await.unwrap());
        assert!(reopened.record(digest).await.is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_new_root_starts_fresh_epoch() {
        let dir = temp_dir("epoch");
        let _ = std::fs::remove_dir_all(&dir);

        let digest = Digest::from_bytes([3u8; 32]);

        {
            let ledger = FileSystemLedger::open(&dir, Digest::from_bytes([9u8; 32]))
                .await
                .unwrap();
            ledger.record(digest).await.unwrap();
        }

        // superseding root discards the old epoch's consumption state
        let superseded = FileSystemLedger::open(&dir, Digest::from_bytes([10u8; 32]))
            .await
            .unwrap();
        assert!(!superseded.is_consumed(digest).await.unwrap());
        assert!(superseded.is_empty().await.unwrap());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_corrupt_log_detected() {
        let dir = temp_dir("corrupt");
        let _ = std::fs::remove_dir_all(&dir);

        let root = Digest::from_bytes([9u8; 32]);
        {
            let ledger = FileSystemLedger::open(&dir, root).await.unwrap();
            ledger.record(Digest::from_bytes([4u8; 32])).await.unwrap();
        }

        std::fs::write(dir.join("consumed.log"), "not-a-digest\n").unwrap();
        let result = FileSystemLedger::open(&dir, root).await;
        assert!(matches!(result, Err(Error::Corrupt(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
