//! Default batch construction and stateless transaction validation.

use shared_types::{BatchError, Transaction, TransactionBatch};

use crate::domain::errors::TransactionValidationError;
use crate::ports::outbound::{TransactionBatchFactory, TransactionValidator};

/// Structural batch validation.
///
/// A group is accepted when it is a single transaction without batch meta,
/// or when every member carries the same meta, the group has exactly the
/// declared size and each member's reduced hash matches its meta entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTransactionBatchFactory;

impl DefaultTransactionBatchFactory {
    fn check(transactions: &[Transaction]) -> Result<(), BatchError> {
        let first = transactions.first().ok_or(BatchError::Empty)?;
        let meta = match &first.batch_meta {
            Some(meta) => meta,
            None if transactions.len() == 1 => return Ok(()),
            None => return Err(BatchError::MissingBatchMeta { index: 0 }),
        };

        for (index, tx) in transactions.iter().enumerate().skip(1) {
            match &tx.batch_meta {
                None => return Err(BatchError::MissingBatchMeta { index }),
                Some(other) if other != meta => {
                    return Err(BatchError::InconsistentBatchMeta { index })
                }
                Some(_) => {}
            }
        }

        if meta.declared_size() != transactions.len() {
            return Err(BatchError::SizeMismatch {
                declared: meta.declared_size(),
                actual: transactions.len(),
            });
        }

        for (index, (tx, expected)) in transactions.iter().zip(&meta.reduced_hashes).enumerate() {
            if tx.reduced_hash() != *expected {
                return Err(BatchError::ReducedHashMismatch { index });
            }
        }
        Ok(())
    }
}

impl TransactionBatchFactory for DefaultTransactionBatchFactory {
    fn create_transaction_batch(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<TransactionBatch, BatchError> {
        Self::check(&transactions)?;
        TransactionBatch::new(transactions)
    }
}

/// Checks that need no ledger state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatelessTransactionValidator;

impl TransactionValidator for StatelessTransactionValidator {
    fn validate(&self, transaction: &Transaction) -> Result<(), TransactionValidationError> {
        let payload = &transaction.reduced_payload;
        if payload.creator_account_id.is_empty() {
            return Err(TransactionValidationError::EmptyCreator);
        }
        if payload.quorum == 0 {
            return Err(TransactionValidationError::ZeroQuorum);
        }
        if let Some(index) = transaction
            .signatures
            .iter()
            .position(|s| s.signature.is_empty())
        {
            return Err(TransactionValidationError::EmptySignature { index });
        }
        Ok(())
    }
}
