//! Eligibility evaluation for a single minting tree
//!
//! A [`MerkleGate`] pairs one committed root with one consumption ledger and
//! answers two questions: *would* this claim mint ([`MerkleGate::check`],
//! pure), and *does* it mint ([`MerkleGate::claim`], which consumes the
//! proof). Verification always fails closed — an error during hashing or
//! folding is never reported as eligible.

use mintgate_ledger::ConsumptionLedger;
use mintgate_merkle::{hash_leaf, verify_proof};
use mintgate_types::{Digest, TokenDna, TreeKind, TreeMetadata};

use crate::error::{Error, Result};

/// Why a claim is or is not eligible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The proof verifies and has not been consumed
    Ok,
    /// The hash chain does not reach the root (or the record/path/root is
    /// malformed)
    ProofInvalid,
    /// The proof verifies but was already consumed in this epoch
    AlreadyConsumed,
}

impl Reason {
    /// Stable wire form of the reason code
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Ok => "ok",
            Reason::ProofInvalid => "proof-invalid",
            Reason::AlreadyConsumed => "already-consumed",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of an eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    /// Whether the claim would currently mint
    pub eligible: bool,
    /// The reason backing the decision
    pub reason: Reason,
}

impl Eligibility {
    /// An eligible result
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            reason: Reason::Ok,
        }
    }

    /// An ineligible result with the given reason
    pub fn rejected(reason: Reason) -> Self {
        Self {
            eligible: false,
            reason,
        }
    }
}

/// Eligibility evaluator for one minting tree
///
/// Holds the tree's published metadata and its consumption ledger. The two
/// gateway flows are two independent instances of this type; they share
/// nothing but the hash primitive.
#[derive(Debug)]
pub struct MerkleGate<L> {
    kind: TreeKind,
    metadata: TreeMetadata,
    ledger: L,
}

impl<L: ConsumptionLedger> MerkleGate<L> {
    /// Create a gate for a published tree
    pub fn new(kind: TreeKind, metadata: TreeMetadata, ledger: L) -> Self {
        Self {
            kind,
            metadata,
            ledger,
        }
    }

    /// Which flow this gate serves
    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// The published metadata of the current epoch
    pub fn metadata(&self) -> &TreeMetadata {
        &self.metadata
    }

    /// The current epoch's committed root
    pub fn root(&self) -> Digest {
        self.metadata.root
    }

    /// Pure eligibility check: proof verification plus replay lookup
    ///
    /// Mutates nothing and can be called from any number of concurrent
    /// callers. Only ledger backend failures surface as errors; a bad proof
    /// or a consumed proof is a normal, ineligible result.
    pub async fn check(&self, dna: &TokenDna, proof: &[Digest]) -> Result<Eligibility> {
        let leaf = match hash_leaf(dna) {
            Ok(leaf) => leaf,
            Err(_) => return Ok(Eligibility::rejected(Reason::ProofInvalid)),
        };

        if verify_proof(&leaf, proof, &self.metadata.root).is_err() {
            return Ok(Eligibility::rejected(Reason::ProofInvalid));
        }

        if self.ledger.is_consumed(leaf).await? {
            return Ok(Eligibility::rejected(Reason::AlreadyConsumed));
        }

        Ok(Eligibility::eligible())
    }

    /// Like [`check`](Self::check), but against a caller-supplied root
    ///
    /// Rejects with [`Error::UnknownRoot`] when the root is not this gate's
    /// current epoch root — a stale proof bundle, not an invalid proof.
    pub async fn check_against(
        &self,
        dna: &TokenDna,
        proof: &[Digest],
        root: &Digest,
    ) -> Result<Eligibility> {
        if root != &self.metadata.root {
            return Err(Error::UnknownRoot(root.to_hex_prefixed()));
        }
        self.check(dna, proof).await
    }

    /// Consume a claim: verify the proof, then atomically record the leaf
    ///
    /// Exactly one of any number of concurrent claims for the same record
    /// succeeds; the rest observe [`Error::AlreadyConsumed`]. Returns the
    /// consumed leaf digest.
    pub async fn claim(&self, dna: &TokenDna, proof: &[Digest]) -> Result<Digest> {
        let leaf = hash_leaf(dna)?;
        verify_proof(&leaf, proof, &self.metadata.root)?;
        self.ledger.record(leaf).await?;

        tracing::debug!(
            tree = %self.kind,
            leaf = %leaf,
            "proof consumed"
        );
        Ok(leaf)
    }

    /// Whether a leaf digest has been consumed in this epoch
    pub async fn proof_used(&self, digest: Digest) -> Result<bool> {
        Ok(self.ledger.is_consumed(digest).await?)
    }

    /// Supersede the tree: replace the metadata and reset the ledger epoch
    pub(crate) async fn supersede(&mut self, metadata: TreeMetadata) -> Result<()> {
        self.ledger.reset().await?;
        self.metadata = metadata;
        Ok(())
    }
}
