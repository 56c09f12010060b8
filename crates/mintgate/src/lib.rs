//! Merkle-gated mint eligibility
//!
//! This is the main entry point for the mintgate library. It pre-validates
//! claims against the two minting trees a deployed contract commits to — an
//! open flow and a gated, allow-listed flow — answering whether a claim
//! would mint and consuming its proof when it does.
//!
//! # Example
//!
//! ```
//! use mintgate::MintGateway;
//! use mintgate::ledger::InMemoryLedger;
//! use mintgate::merkle::MerkleTree;
//! use mintgate::types::{Digest, TokenDna, TreeMetadata};
//!
//! # async fn example() -> Result<(), mintgate::Error> {
//! let records = vec![
//!     TokenDna::new(Digest::from_bytes([1u8; 32]), 1_650_000_000, "ipfs://Qm1"),
//!     TokenDna::new(Digest::from_bytes([2u8; 32]), 1_650_000_001, "ipfs://Qm2"),
//! ];
//! let tree = MerkleTree::from_records(&records)?;
//!
//! let gateway = MintGateway::new(
//!     TreeMetadata::new(tree.root(), "QmOpenData"),
//!     InMemoryLedger::new(),
//!     TreeMetadata::new(tree.root(), "QmGatedData"),
//!     InMemoryLedger::new(),
//! );
//!
//! let proof = tree.prove(0)?;
//! let eligibility = gateway.can_open_mint(&records[0], &proof).await?;
//! assert!(eligibility.eligible);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod eligibility;
pub mod error;
pub mod gateway;

// Re-export core crates
pub use mintgate_ledger as ledger;
pub use mintgate_merkle as merkle;
pub use mintgate_types as types;

pub use config::GatewayConfig;
pub use eligibility::{Eligibility, MerkleGate, Reason};
pub use error::{Error, Result};
pub use gateway::{BatchClaim, MintGateway};
