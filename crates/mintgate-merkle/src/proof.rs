//! Merkle proof verification
//!
//! Folds a claimed leaf through an ordered sibling path and compares the
//! result against a committed root. Verification is pure and fail-closed:
//! any malformed input is an error, never a success.

use mintgate_types::{Digest, TokenDna};

use crate::error::{Error, Result};
use crate::hashing::{hash_leaf, hash_pair};

/// Proof paths longer than this cannot come from any realistic tree
/// (2^64 leaves) and are rejected before hashing.
pub const MAX_PROOF_DEPTH: usize = 64;

/// Verify an inclusion proof for a leaf digest against a committed root
///
/// # Arguments
/// * `leaf` - The leaf digest being proven
/// * `proof` - Ordered sibling digests from leaf level to just below the root
/// * `root` - The committed root to verify against
///
/// # Returns
/// * `Ok(())` if folding the path reproduces `root`
/// * `Err(...)` otherwise
///
/// A zero-length path is accepted only for the single-leaf tree, where the
/// leaf is itself the root; in every other case an empty path is an error,
/// not a trivial success.
pub fn verify_proof(leaf: &Digest, proof: &[Digest], root: &Digest) -> Result<()> {
    if root.is_zero() {
        return Err(Error::EmptyRoot("root is unset".to_string()));
    }

    if proof.len() > MAX_PROOF_DEPTH {
        return Err(Error::InvalidProof(format!(
            "proof depth {} exceeds maximum {}",
            proof.len(),
            MAX_PROOF_DEPTH
        )));
    }

    if proof.is_empty() {
        // Single-leaf tree: the leaf is the root. Explicit, not a fall-through.
        if leaf == root {
            return Ok(());
        }
        return Err(Error::InvalidProof(
            "empty proof path for a multi-leaf root".to_string(),
        ));
    }

    let mut hash = *leaf;
    for sibling in proof {
        hash = hash_pair(&hash, sibling);
    }

    if &hash != root {
        return Err(Error::RootMismatch {
            expected: root.to_hex(),
            actual: hash.to_hex(),
        });
    }

    Ok(())
}

/// Verify an inclusion proof for an identity record
///
/// Hashes the record's canonical encoding and delegates to [`verify_proof`].
/// An encoding failure is reported as an error; it never verifies.
pub fn verify_record_proof(dna: &TokenDna, proof: &[Digest], root: &Digest) -> Result<()> {
    let leaf = hash_leaf(dna)?;
    verify_proof(&leaf, proof, root)
}
