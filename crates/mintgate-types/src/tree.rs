//! Tree identity and published metadata
//!
//! The gateway runs two independent claim flows, each committed to by its own
//! root. [`TreeKind`] names the flow; [`TreeMetadata`] is what the issuer
//! publishes when a tree is created or superseded.

use crate::encoding::Digest;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which of the two claim flows a tree belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    /// Public mint, open to any committed record
    Open,
    /// Allow-listed mint
    Gated,
}

impl TreeKind {
    /// Wire discriminant, matching the issuer's published enum
    pub fn as_u8(&self) -> u8 {
        match self {
            TreeKind::Open => 0,
            TreeKind::Gated => 1,
        }
    }

    /// Parse from the wire discriminant
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(TreeKind::Open),
            1 => Ok(TreeKind::Gated),
            other => Err(Error::InvalidTreeKind(other)),
        }
    }
}

impl std::fmt::Display for TreeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeKind::Open => write!(f, "open"),
            TreeKind::Gated => write!(f, "gated"),
        }
    }
}

/// Metadata published alongside a committed root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeMetadata {
    /// The committed root
    pub root: Digest,
    /// IPFS hash of the full leaf data set the root was built from
    pub data_ipfs_hash: String,
}

impl TreeMetadata {
    /// Create new tree metadata
    pub fn new(root: Digest, data_ipfs_hash: impl Into<String>) -> Self {
        Self {
            root,
            data_ipfs_hash: data_ipfs_hash.into(),
        }
    }
}
