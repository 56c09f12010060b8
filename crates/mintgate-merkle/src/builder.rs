//! Issuer-side Merkle tree construction
//!
//! Builds the full tree level by level so proofs can be extracted for any
//! leaf. An odd node at the end of a level is paired with itself, the same
//! convention the published roots were generated under.

use mintgate_types::{Digest, TokenDna};

use crate::error::{Error, Result};
use crate::hashing::{hash_leaf, hash_pair};

/// A fully materialized Merkle tree
///
/// Level 0 holds the leaves; the last level holds the single root.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree from leaf digests
    pub fn build(leaves: Vec<Digest>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(Error::EmptyTree("cannot build a tree with no leaves".to_string()));
        }

        let mut level = leaves.clone();
        let mut levels = vec![leaves];
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            for chunk in level.chunks(2) {
                let left = chunk[0];
                let right = if chunk.len() == 2 { chunk[1] } else { left };
                next.push(hash_pair(&left, &right));
            }
            levels.push(next.clone());
            level = next;
        }

        Ok(Self { levels })
    }

    /// Build a tree from identity records, hashing each into its leaf
    pub fn from_records(records: &[TokenDna]) -> Result<Self> {
        let leaves = records.iter().map(hash_leaf).collect::<Result<Vec<_>>>()?;
        Self::build(leaves)
    }

    /// The committed root
    pub fn root(&self) -> Digest {
        self.levels.last().expect("at least one level")[0]
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Tree depth (number of levels above the leaves)
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Leaf digest at an index
    pub fn leaf(&self, index: usize) -> Option<Digest> {
        self.levels[0].get(index).copied()
    }

    /// Extract the sibling path for the leaf at `index`
    ///
    /// The path is ordered from the leaf level upward; its length equals the
    /// tree depth. Where a node was paired with itself, the node's own digest
    /// appears in the path.
    pub fn prove(&self, index: usize) -> Result<Vec<Digest>> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(Error::InvalidLeafIndex(format!(
                "leaf index {} out of bounds for tree with {} leaves",
                index, leaf_count
            )));
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut current = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = if current % 2 == 0 { current + 1 } else { current - 1 };
            // last node of an odd-length level pairs with itself
            let sibling = sibling.min(level.len() - 1);
            proof.push(level[sibling]);
            current /= 2;
        }

        Ok(proof)
    }
}
