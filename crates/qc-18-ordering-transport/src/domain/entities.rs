//! Domain entities for the Ordering Transport

use std::sync::Arc;

use shared_types::{Transaction, TransactionBatch};

/// Batches propagated together as one message.
///
/// Batches are shared, not copied, when a collection fans out to several
/// peers. Order is preserved end to end.
pub type BatchCollection = Vec<Arc<TransactionBatch>>;

/// Flatten a collection into its transactions, batch by batch.
pub fn collection_transactions(collection: &BatchCollection) -> impl Iterator<Item = &Transaction> {
    collection.iter().flat_map(|batch| batch.transactions().iter())
}

/// Total number of transactions in a collection.
pub fn collection_size(collection: &BatchCollection) -> usize {
    collection.iter().map(|batch| batch.len()).sum()
}
