//! Core types and data structures for mintgate
//!
//! This crate provides the fundamental data structures used throughout the
//! mint gateway: fixed-size digests, the identity records committed into the
//! minting trees, recipient addresses, and published tree metadata.

pub mod address;
pub mod dna;
pub mod encoding;
pub mod error;
pub mod tree;

pub use address::Address;
pub use dna::{TokenDna, ENCODING_VERSION};
pub use encoding::{Digest, Hex};
pub use error::{Error, Result};
pub use tree::{TreeKind, TreeMetadata};
