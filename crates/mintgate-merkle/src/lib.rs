//! Merkle tree hashing and proof verification for mintgate
//!
//! This crate implements the hashing primitive, inclusion-proof verification,
//! and issuer-side tree construction for the Merkle-gated minting flows. The
//! pair combination is order-canonical (children sorted bytewise before
//! hashing), matching the external generator the committed roots come from.

pub mod builder;
pub mod error;
pub mod hashing;
pub mod proof;

pub use builder::MerkleTree;
pub use error::{Error, Result};
pub use hashing::{hash_leaf, hash_pair, keccak256, HASH_SIZE};
pub use proof::{verify_proof, verify_record_proof, MAX_PROOF_DEPTH};
