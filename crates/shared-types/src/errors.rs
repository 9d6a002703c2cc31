//! # Error Types
//!
//! Defines error types shared across crates.

use thiserror::Error;

/// Reasons a candidate group of transactions cannot form a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// No transactions in the candidate group.
    #[error("Batch is empty")]
    Empty,

    /// A multi-transaction group contains a transaction without batch meta.
    #[error("Transaction {index} carries no batch meta")]
    MissingBatchMeta { index: usize },

    /// Members disagree on the batch meta.
    #[error("Transaction {index} carries a different batch meta")]
    InconsistentBatchMeta { index: usize },

    /// The group size differs from the size declared in the meta.
    #[error("Batch declares {declared} transactions, got {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    /// A member's reduced hash differs from the meta entry at its position.
    #[error("Reduced hash of transaction {index} does not match batch meta")]
    ReducedHashMismatch { index: usize },
}
