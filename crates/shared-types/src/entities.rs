//! # Core Domain Entities
//!
//! Defines the entities that flow through the ordering pipeline.
//!
//! ## Clusters
//!
//! - **Consensus progression**: `Round`
//! - **Chain**: `Transaction`, `TransactionBatch`, `Proposal`
//! - **Networking**: `PeerIdentity`

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::BatchError;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte SHA-256 hash.
pub type Hash = [u8; 32];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// Reject round assigned to the first attempt of every block round.
pub const FIRST_REJECT_ROUND: u64 = 0;

// =============================================================================
// CLUSTER A: CONSENSUS PROGRESSION
// =============================================================================

/// Identifier of a consensus round.
///
/// Rounds order lexicographically: first by `block_round`, then by
/// `reject_round`. The derived `Ord` relies on field declaration order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Round {
    /// Height of the block being agreed upon.
    pub block_round: u64,
    /// Number of rejected attempts at this height.
    pub reject_round: u64,
}

impl Round {
    pub const fn new(block_round: u64, reject_round: u64) -> Self {
        Self {
            block_round,
            reject_round,
        }
    }

    /// Round that follows a commit of this round, `None` past `u64::MAX`.
    #[must_use]
    pub const fn next_commit_round(&self) -> Option<Self> {
        match self.block_round.checked_add(1) {
            Some(block_round) => Some(Self::new(block_round, FIRST_REJECT_ROUND)),
            None => None,
        }
    }

    /// Round that follows a reject of this round, `None` past `u64::MAX`.
    #[must_use]
    pub const fn next_reject_round(&self) -> Option<Self> {
        match self.reject_round.checked_add(1) {
            Some(reject_round) => Some(Self::new(self.block_round, reject_round)),
            None => None,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.block_round, self.reject_round)
    }
}

// =============================================================================
// CLUSTER B: NETWORKING
// =============================================================================

/// Identity of a network counterparty.
///
/// Supplied by the membership collaborator. The ordering layer relies on
/// equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerIdentity {
    /// Network address (`host:port`).
    pub address: String,
    /// Peer public key.
    pub public_key: PublicKey,
}

impl PeerIdentity {
    pub fn new(address: impl Into<String>, public_key: PublicKey) -> Self {
        Self {
            address: address.into(),
            public_key,
        }
    }
}

impl fmt::Display for PeerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}",
            self.address,
            hex::encode(&self.public_key[..4])
        )
    }
}

// =============================================================================
// CLUSTER C: THE CHAIN
// =============================================================================

/// How a batch is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchType {
    /// Every transaction commits or none does.
    Atomic,
    /// Transactions commit in order; failures do not roll back earlier ones.
    Ordered,
}

/// Batch membership marker carried by every transaction of a batch.
///
/// Two transactions belong to the same batch iff their metas are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchMeta {
    pub batch_type: BatchType,
    /// Reduced hashes of all batch members, in batch order.
    pub reduced_hashes: Vec<Hash>,
}

impl BatchMeta {
    /// Number of transactions the batch declares.
    pub fn declared_size(&self) -> usize {
        self.reduced_hashes.len()
    }
}

/// The part of a transaction signed by its creator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducedPayload {
    /// Encoded commands. Opaque to the ordering layer.
    pub commands: Vec<Vec<u8>>,
    pub creator_account_id: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_time: u64,
    /// Number of signatures required.
    pub quorum: u32,
}

impl ReducedPayload {
    /// SHA-256 over all reduced fields.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update((self.commands.len() as u64).to_le_bytes());
        for command in &self.commands {
            hasher.update((command.len() as u64).to_le_bytes());
            hasher.update(command);
        }
        hasher.update((self.creator_account_id.len() as u64).to_le_bytes());
        hasher.update(self.creator_account_id.as_bytes());
        hasher.update(self.created_time.to_le_bytes());
        hasher.update(self.quorum.to_le_bytes());
        hasher.finalize().into()
    }
}

/// A single signature over a transaction payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signatory {
    pub public_key: PublicKey,
    pub signature: Vec<u8>,
}

/// A transaction as seen by the ordering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub reduced_payload: ReducedPayload,
    /// Present iff the transaction belongs to a multi-transaction batch.
    pub batch_meta: Option<BatchMeta>,
    pub signatures: Vec<Signatory>,
}

impl Transaction {
    pub fn new(reduced_payload: ReducedPayload) -> Self {
        Self {
            reduced_payload,
            batch_meta: None,
            signatures: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_batch_meta(mut self, meta: BatchMeta) -> Self {
        self.batch_meta = Some(meta);
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signatory: Signatory) -> Self {
        self.signatures.push(signatory);
        self
    }

    pub fn creator_account_id(&self) -> &str {
        &self.reduced_payload.creator_account_id
    }

    /// Hash identifying this transaction inside a batch meta.
    pub fn reduced_hash(&self) -> Hash {
        self.reduced_payload.hash()
    }
}

/// An ordered, non-empty group of transactions committed together.
///
/// Immutable once built. Construction only checks the structural invariant;
/// batch-level validation belongs to the batch factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBatch {
    transactions: Vec<Transaction>,
}

impl TransactionBatch {
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, BatchError> {
        if transactions.is_empty() {
            return Err(BatchError::Empty);
        }
        Ok(Self { transactions })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// A candidate block body for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub height: u64,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_time: u64,
    pub transactions: Vec<Transaction>,
}

impl Proposal {
    pub fn new(height: u64, created_time: u64, transactions: Vec<Transaction>) -> Self {
        Self {
            height,
            created_time,
            transactions,
        }
    }
}
