//! Wire Payloads for the On-Demand Ordering Service
//!
//! Message layout exchanged between peers. Byte fields stay variable-length
//! on the wire and are checked when converted into domain types.

use serde::{Deserialize, Serialize};
use shared_types::{
    BatchMeta, BatchType, Hash, Proposal, PublicKey, ReducedPayload, Round, Signatory,
    Transaction,
};

use crate::domain::errors::ConversionError;

const BATCH_TYPE_ATOMIC: u32 = 0;
const BATCH_TYPE_ORDERED: u32 = 1;

// ============================================================
// TRANSACTIONS
// ============================================================

/// Signed fields of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireReducedPayload {
    pub commands: Vec<Vec<u8>>,
    pub creator_account_id: String,
    pub created_time: u64,
    pub quorum: u32,
}

/// Batch membership marker. `batch_type`: 0 = atomic, 1 = ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBatchMeta {
    pub batch_type: u32,
    pub reduced_hashes: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePayload {
    pub reduced_payload: WireReducedPayload,
    pub batch: Option<WireBatchMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSignature {
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTransaction {
    pub payload: WirePayload,
    pub signatures: Vec<WireSignature>,
}

// ============================================================
// BATCH SUBMISSION
// ============================================================

/// `SendBatches` request: the flattened transactions of a batch collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchesRequest {
    pub transactions: Vec<WireTransaction>,
}

/// Empty acknowledgment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack;

// ============================================================
// PROPOSAL REQUEST
// ============================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRound {
    pub block_round: u64,
    pub reject_round: u64,
}

/// `RequestProposal` request. A missing round is a protocol error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub round: Option<WireRound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireProposal {
    pub height: u64,
    pub created_time: u64,
    pub transactions: Vec<WireTransaction>,
}

/// `RequestProposal` response. The cache hint is attached whether or not a
/// proposal is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub proposal: Option<WireProposal>,
    pub has_enough_batches_in_cache: bool,
}

impl ProposalResponse {
    pub fn has_proposal(&self) -> bool {
        self.proposal.is_some()
    }
}

// ============================================================
// ENVELOPES
// ============================================================

/// Every request the server accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OdOsRequest {
    SendBatches(BatchesRequest),
    RequestProposal(ProposalRequest),
}

/// Every response the server produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OdOsResponse {
    Ack(Ack),
    Proposal(ProposalResponse),
}

// ============================================================
// CONVERSIONS
// ============================================================

impl From<Round> for WireRound {
    fn from(round: Round) -> Self {
        Self {
            block_round: round.block_round,
            reject_round: round.reject_round,
        }
    }
}

impl From<WireRound> for Round {
    fn from(round: WireRound) -> Self {
        Round::new(round.block_round, round.reject_round)
    }
}

impl From<&Transaction> for WireTransaction {
    fn from(tx: &Transaction) -> Self {
        let reduced = &tx.reduced_payload;
        Self {
            payload: WirePayload {
                reduced_payload: WireReducedPayload {
                    commands: reduced.commands.clone(),
                    creator_account_id: reduced.creator_account_id.clone(),
                    created_time: reduced.created_time,
                    quorum: reduced.quorum,
                },
                batch: tx.batch_meta.as_ref().map(|meta| WireBatchMeta {
                    batch_type: match meta.batch_type {
                        BatchType::Atomic => BATCH_TYPE_ATOMIC,
                        BatchType::Ordered => BATCH_TYPE_ORDERED,
                    },
                    reduced_hashes: meta.reduced_hashes.iter().map(|h| h.to_vec()).collect(),
                }),
            },
            signatures: tx
                .signatures
                .iter()
                .map(|s| WireSignature {
                    public_key: s.public_key.to_vec(),
                    signature: s.signature.clone(),
                })
                .collect(),
        }
    }
}

impl TryFrom<WireBatchMeta> for BatchMeta {
    type Error = ConversionError;

    fn try_from(meta: WireBatchMeta) -> Result<Self, Self::Error> {
        let batch_type = match meta.batch_type {
            BATCH_TYPE_ATOMIC => BatchType::Atomic,
            BATCH_TYPE_ORDERED => BatchType::Ordered,
            other => return Err(ConversionError::UnknownBatchType(other)),
        };
        let reduced_hashes = meta
            .reduced_hashes
            .into_iter()
            .map(|bytes| {
                Hash::try_from(bytes.as_slice()).map_err(|_| ConversionError::InvalidHashLength {
                    field: "reduced hash",
                    len: bytes.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BatchMeta {
            batch_type,
            reduced_hashes,
        })
    }
}

impl TryFrom<WireSignature> for Signatory {
    type Error = ConversionError;

    fn try_from(sig: WireSignature) -> Result<Self, Self::Error> {
        let public_key = PublicKey::try_from(sig.public_key.as_slice()).map_err(|_| {
            ConversionError::InvalidPublicKeyLength {
                len: sig.public_key.len(),
            }
        })?;
        Ok(Signatory {
            public_key,
            signature: sig.signature,
        })
    }
}

impl TryFrom<WireTransaction> for Transaction {
    type Error = ConversionError;

    fn try_from(wire: WireTransaction) -> Result<Self, Self::Error> {
        let reduced = wire.payload.reduced_payload;
        Ok(Transaction {
            reduced_payload: ReducedPayload {
                commands: reduced.commands,
                creator_account_id: reduced.creator_account_id,
                created_time: reduced.created_time,
                quorum: reduced.quorum,
            },
            batch_meta: wire.payload.batch.map(BatchMeta::try_from).transpose()?,
            signatures: wire
                .signatures
                .into_iter()
                .map(Signatory::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<&Proposal> for WireProposal {
    fn from(proposal: &Proposal) -> Self {
        Self {
            height: proposal.height,
            created_time: proposal.created_time,
            transactions: proposal.transactions.iter().map(WireTransaction::from).collect(),
        }
    }
}

impl TryFrom<WireProposal> for Proposal {
    type Error = ConversionError;

    fn try_from(wire: WireProposal) -> Result<Self, Self::Error> {
        let transactions = wire
            .transactions
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Proposal::new(wire.height, wire.created_time, transactions))
    }
}
