//! Merkle tree hashing primitives
//!
//! Keccak-256 hashing with the commutative pair convention used by the
//! external proof generator: the two children are sorted bytewise before
//! hashing, so a proof path carries no explicit left/right markers. The leaf
//! pre-image is the versioned canonical encoding of the identity record.

use mintgate_types::{Digest, TokenDna};
use sha3::{Digest as _, Keccak256};

use crate::error::Result;

/// Digest size in bytes (Keccak-256)
pub const HASH_SIZE: usize = 32;

/// Keccak-256 of arbitrary bytes
pub fn keccak256(data: &[u8]) -> Digest {
    let hash: [u8; 32] = Keccak256::digest(data).into();
    Digest::from_bytes(hash)
}

/// Hash an identity record into its leaf digest
///
/// Returns: Keccak256(canonical_bytes(dna))
///
/// Fails if the record cannot be canonically encoded; a digest computed under
/// a different encoding version will simply never match the committed root.
pub fn hash_leaf(dna: &TokenDna) -> Result<Digest> {
    Ok(keccak256(&dna.canonical_bytes()?))
}

/// Hash two sibling digests into their parent
///
/// Returns: Keccak256(min(a, b) || max(a, b))
///
/// The bytewise sort makes the combination order-canonical: whichever side
/// the sibling was on, the same parent is produced.
pub fn hash_pair(a: &Digest, b: &Digest) -> Digest {
    let (lo, hi) = if a.as_bytes() <= b.as_bytes() {
        (a, b)
    } else {
        (b, a)
    };
    let hash: [u8; 32] = Keccak256::new()
        .chain_update(lo.as_bytes())
        .chain_update(hi.as_bytes())
        .finalize()
        .into();
    Digest::from_bytes(hash)
}
