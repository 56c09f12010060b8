//! The two-tree mint gateway
//!
//! [`MintGateway`] mirrors the deployed minting contract's surface: an open
//! flow and a gated flow, each backed by its own tree and its own
//! consumption ledger, plus the administrative operations (tree supersession,
//! pause, pricing) an operator uses between epochs. Read-only checks keep
//! working while the gateway is paused; claims do not.

use mintgate_ledger::ConsumptionLedger;
use mintgate_merkle::verify_record_proof;
use mintgate_types::{Address, Digest, TokenDna, TreeKind, TreeMetadata};

use crate::eligibility::{Eligibility, MerkleGate};
use crate::error::{Error, Result};

/// A single claim in a batch mint: the record and its proof path
pub type BatchClaim = (TokenDna, Vec<Digest>);

/// Merkle-gated mint gateway over two independent trees
#[derive(Debug)]
pub struct MintGateway<L> {
    open: MerkleGate<L>,
    gated: MerkleGate<L>,
    price_per_token_wei: u128,
    gated_price_per_token_wei: u128,
    paused: bool,
}

impl<L: ConsumptionLedger> MintGateway<L> {
    /// Create a gateway from the two published trees
    pub fn new(
        open_metadata: TreeMetadata,
        open_ledger: L,
        gated_metadata: TreeMetadata,
        gated_ledger: L,
    ) -> Self {
        Self {
            open: MerkleGate::new(TreeKind::Open, open_metadata, open_ledger),
            gated: MerkleGate::new(TreeKind::Gated, gated_metadata, gated_ledger),
            price_per_token_wei: 0,
            gated_price_per_token_wei: 0,
            paused: false,
        }
    }

    /// Set both mint prices, in wei per token
    pub fn with_prices(mut self, price_per_token_wei: u128, gated_price_per_token_wei: u128) -> Self {
        self.price_per_token_wei = price_per_token_wei;
        self.gated_price_per_token_wei = gated_price_per_token_wei;
        self
    }

    fn gate(&self, kind: TreeKind) -> &MerkleGate<L> {
        match kind {
            TreeKind::Open => &self.open,
            TreeKind::Gated => &self.gated,
        }
    }

    fn gate_mut(&mut self, kind: TreeKind) -> &mut MerkleGate<L> {
        match kind {
            TreeKind::Open => &mut self.open,
            TreeKind::Gated => &mut self.gated,
        }
    }

    // ==== Read-only surface ====

    /// Eligibility of a claim under the open tree
    pub async fn can_open_mint(&self, dna: &TokenDna, proof: &[Digest]) -> Result<Eligibility> {
        self.open.check(dna, proof).await
    }

    /// Eligibility of a claim under the gated tree
    pub async fn can_gated_mint(&self, dna: &TokenDna, proof: &[Digest]) -> Result<Eligibility> {
        self.gated.check(dna, proof).await
    }

    /// Whether a leaf digest has been consumed under the given tree
    pub async fn proof_used(&self, kind: TreeKind, digest: Digest) -> Result<bool> {
        self.gate(kind).proof_used(digest).await
    }

    /// Published metadata of a tree's current epoch
    pub fn tree_metadata(&self, kind: TreeKind) -> &TreeMetadata {
        self.gate(kind).metadata()
    }

    /// Whether claims are currently rejected
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Price of one open-mint token, in wei
    pub fn price_per_token_wei(&self) -> u128 {
        self.price_per_token_wei
    }

    /// Price of one gated-mint token, in wei
    pub fn gated_price_per_token_wei(&self) -> u128 {
        self.gated_price_per_token_wei
    }

    /// Total price of `count` tokens under the given flow, in wei
    pub fn quote(&self, kind: TreeKind, count: usize) -> u128 {
        let unit = match kind {
            TreeKind::Open => self.price_per_token_wei,
            TreeKind::Gated => self.gated_price_per_token_wei,
        };
        unit.saturating_mul(count as u128)
    }

    // ==== Claims ====

    /// Claim one token under the open tree
    pub async fn open_mint(
        &self,
        recipient: Address,
        dna: &TokenDna,
        proof: &[Digest],
    ) -> Result<Digest> {
        self.mint(TreeKind::Open, recipient, dna, proof).await
    }

    /// Claim one token under the gated tree
    pub async fn gated_mint(
        &self,
        recipient: Address,
        dna: &TokenDna,
        proof: &[Digest],
    ) -> Result<Digest> {
        self.mint(TreeKind::Gated, recipient, dna, proof).await
    }

    async fn mint(
        &self,
        kind: TreeKind,
        recipient: Address,
        dna: &TokenDna,
        proof: &[Digest],
    ) -> Result<Digest> {
        if self.paused {
            return Err(Error::Paused);
        }

        let leaf = self.gate(kind).claim(dna, proof).await?;
        tracing::info!(
            nfc_id = %dna.nfc_id,
            tree = %kind,
            recipient = %recipient,
            "purchased"
        );
        Ok(leaf)
    }

    /// Claim a batch of tokens under the open tree
    pub async fn multi_open_mint(
        &self,
        recipient: Address,
        claims: &[BatchClaim],
    ) -> Result<Vec<Digest>> {
        self.multi_mint(TreeKind::Open, recipient, claims).await
    }

    /// Claim a batch of tokens under the gated tree
    pub async fn multi_gated_mint(
        &self,
        recipient: Address,
        claims: &[BatchClaim],
    ) -> Result<Vec<Digest>> {
        self.multi_mint(TreeKind::Gated, recipient, claims).await
    }

    /// Batch claim: every proof is verified before anything is consumed,
    /// then claims are recorded in order. The first consumption failure
    /// aborts the remainder; digests consumed before the failure stay
    /// consumed (the ledger is monotonic).
    async fn multi_mint(
        &self,
        kind: TreeKind,
        recipient: Address,
        claims: &[BatchClaim],
    ) -> Result<Vec<Digest>> {
        if self.paused {
            return Err(Error::Paused);
        }

        let root = self.gate(kind).root();
        for (dna, proof) in claims {
            verify_record_proof(dna, proof, &root)?;
        }

        let mut leaves = Vec::with_capacity(claims.len());
        for (dna, proof) in claims {
            let leaf = self.gate(kind).claim(dna, proof).await?;
            tracing::info!(
                nfc_id = %dna.nfc_id,
                tree = %kind,
                recipient = %recipient,
                "purchased"
            );
            leaves.push(leaf);
        }
        Ok(leaves)
    }

    // ==== Administration ====

    /// Supersede a tree with newly published metadata
    ///
    /// Replaces the root and resets that tree's consumption epoch; the other
    /// tree is untouched.
    pub async fn update_tree(&mut self, kind: TreeKind, metadata: TreeMetadata) -> Result<()> {
        self.gate_mut(kind).supersede(metadata).await?;
        tracing::info!(
            tree = %kind,
            root = %self.gate(kind).root(),
            "merkle tree updated"
        );
        Ok(())
    }

    /// Stop accepting claims
    pub fn pause(&mut self) {
        self.paused = true;
        tracing::info!("gateway paused");
    }

    /// Resume accepting claims
    pub fn unpause(&mut self) {
        self.paused = false;
        tracing::info!("gateway unpaused");
    }

    /// Update the open-mint price, in wei per token
    pub fn update_price(&mut self, price_per_token_wei: u128) {
        self.price_per_token_wei = price_per_token_wei;
    }

    /// Update the gated-mint price, in wei per token
    pub fn update_gated_price(&mut self, price_per_token_wei: u128) {
        self.gated_price_per_token_wei = price_per_token_wei;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::Reason;
    use mintgate_ledger::InMemoryLedger;
    use mintgate_merkle::MerkleTree;

    fn record(i: u64) -> TokenDna {
        let mut id = [0u8; 32];
        id[24..32].copy_from_slice(&i.to_be_bytes());
        TokenDna::new(Digest::from_bytes(id), 1_650_000_000 + i, format!("ipfs://Qm{}", i))
    }

    fn recipient() -> Address {
        Address::from_hex("0x1234567890abcdef1234567890abcdef12345678").unwrap()
    }

    fn gateway(
        open: &[TokenDna],
        gated: &[TokenDna],
    ) -> (MintGateway<InMemoryLedger>, MerkleTree, MerkleTree) {
        let open_tree = MerkleTree::from_records(open).unwrap();
        let gated_tree = MerkleTree::from_records(gated).unwrap();
        let gw = MintGateway::new(
            TreeMetadata::new(open_tree.root(), "QmOpen"),
            InMemoryLedger::new(),
            TreeMetadata::new(gated_tree.root(), "QmGated"),
            InMemoryLedger::new(),
        );
        (gw, open_tree, gated_tree)
    }

    #[tokio::test]
    async fn test_trees_are_independent() {
        // overlapping records, different roots, separate consumption sets
        let shared: Vec<_> = (0..4).map(record).collect();
        let mut gated_recs = shared.clone();
        gated_recs.push(record(50));
        let (gw, open_tree, gated_tree) = gateway(&shared, &gated_recs);

        let open_proof = open_tree.prove(1).unwrap();
        let gated_proof = gated_tree.prove(1).unwrap();

        // open proof does not validate under the gated root
        let cross = gw.can_gated_mint(&shared[1], &open_proof).await.unwrap();
        assert_eq!(cross.reason, Reason::ProofInvalid);

        // consuming under one tree leaves the other eligible
        gw.open_mint(recipient(), &shared[1], &open_proof).await.unwrap();
        let still = gw.can_gated_mint(&shared[1], &gated_proof).await.unwrap();
        assert!(still.eligible);
    }

    #[tokio::test]
    async fn test_double_mint_reports_already_consumed() {
        let recs: Vec<_> = (0..4).map(record).collect();
        let (gw, open_tree, _) = gateway(&recs, &recs);
        let proof = open_tree.prove(0).unwrap();

        gw.open_mint(recipient(), &recs[0], &proof).await.unwrap();
        let err = gw.open_mint(recipient(), &recs[0], &proof).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyConsumed(_)));

        assert!(gw
            .proof_used(TreeKind::Open, mintgate_merkle::hash_leaf(&recs[0]).unwrap())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_paused_rejects_claims_but_answers_checks() {
        let recs: Vec<_> = (0..2).map(record).collect();
        let (mut gw, open_tree, _) = gateway(&recs, &recs);
        let proof = open_tree.prove(0).unwrap();

        gw.pause();
        assert!(gw.paused());
        assert!(matches!(
            gw.open_mint(recipient(), &recs[0], &proof).await.unwrap_err(),
            Error::Paused
        ));

        let check = gw.can_open_mint(&recs[0], &proof).await.unwrap();
        assert!(check.eligible);

        gw.unpause();
        assert!(gw.open_mint(recipient(), &recs[0], &proof).await.is_ok());
    }

    #[tokio::test]
    async fn test_multi_mint_all_or_verify() {
        let recs: Vec<_> = (0..4).map(record).collect();
        let (gw, open_tree, _) = gateway(&recs, &recs);

        let claims: Vec<BatchClaim> = (0..3)
            .map(|i| (recs[i].clone(), open_tree.prove(i).unwrap()))
            .collect();
        let leaves = gw.multi_open_mint(recipient(), &claims).await.unwrap();
        assert_eq!(leaves.len(), 3);

        // one bad proof in the batch consumes nothing
        let mut bad = vec![(recs[3].clone(), open_tree.prove(3).unwrap())];
        bad.push((recs[3].clone(), vec![Digest::from_bytes([0xee; 32])]));
        assert!(matches!(
            gw.multi_open_mint(recipient(), &bad).await.unwrap_err(),
            Error::ProofInvalid(_)
        ));
        let still = gw
            .can_open_mint(&recs[3], &open_tree.prove(3).unwrap())
            .await
            .unwrap();
        assert!(still.eligible);
    }

    #[tokio::test]
    async fn test_update_tree_resets_only_its_epoch() {
        let old_recs: Vec<_> = (0..2).map(record).collect();
        let (mut gw, open_tree, gated_tree) = gateway(&old_recs, &old_recs);

        gw.open_mint(recipient(), &old_recs[0], &open_tree.prove(0).unwrap())
            .await
            .unwrap();
        gw.gated_mint(recipient(), &old_recs[0], &gated_tree.prove(0).unwrap())
            .await
            .unwrap();

        let new_recs: Vec<_> = (10..13).map(record).collect();
        let new_tree = MerkleTree::from_records(&new_recs).unwrap();
        gw.update_tree(TreeKind::Open, TreeMetadata::new(new_tree.root(), "QmNew"))
            .await
            .unwrap();

        assert_eq!(gw.tree_metadata(TreeKind::Open).root, new_tree.root());
        // new epoch, fresh consumption set
        let check = gw
            .can_open_mint(&new_recs[1], &new_tree.prove(1).unwrap())
            .await
            .unwrap();
        assert!(check.eligible);

        // gated tree untouched: its record is still consumed
        let gated = gw
            .can_gated_mint(&old_recs[0], &gated_tree.prove(0).unwrap())
            .await
            .unwrap();
        assert_eq!(gated.reason, Reason::AlreadyConsumed);
    }

    #[tokio::test]
    async fn test_quote_and_prices() {
        let recs: Vec<_> = (0..2).map(record).collect();
        let (gw, _, _) = gateway(&recs, &recs);
        let mut gw = gw.with_prices(100, 40);

        assert_eq!(gw.quote(TreeKind::Open, 3), 300);
        assert_eq!(gw.quote(TreeKind::Gated, 3), 120);
        assert_eq!(gw.quote(TreeKind::Open, 0), 0);

        gw.update_price(110);
        gw.update_gated_price(50);
        assert_eq!(gw.price_per_token_wei(), 110);
        assert_eq!(gw.gated_price_per_token_wei(), 50);
    }
}
