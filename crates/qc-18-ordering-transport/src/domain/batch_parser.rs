//! Batch candidate parsing
//!
//! Partitions a flat transaction list into candidate batches. Pure: no
//! validation happens here, the batch factory decides whether a candidate is
//! a valid batch.
//!
//! ## Grouping rule
//!
//! - A transaction without batch meta is a singleton candidate.
//! - A transaction with batch meta starts a candidate that extends over the
//!   following transactions carrying an identical meta, up to the size the
//!   meta declares.
//!
//! Candidates keep the relative order of the input.

use shared_types::Transaction;

/// Split `transactions` into batch candidates.
pub fn parse_batches(transactions: Vec<Transaction>) -> Vec<Vec<Transaction>> {
    let mut candidates: Vec<Vec<Transaction>> = Vec::new();
    let mut open: Option<usize> = None;

    for tx in transactions {
        let extends_open = match (open, &tx.batch_meta) {
            (Some(idx), Some(meta)) => {
                let current = &candidates[idx];
                current[0].batch_meta.as_ref() == Some(meta)
                    && current.len() < meta.declared_size()
            }
            _ => false,
        };

        if extends_open {
            if let Some(idx) = open {
                candidates[idx].push(tx);
            }
            continue;
        }

        open = tx.batch_meta.as_ref().map(|_| candidates.len());
        candidates.push(vec![tx]);
    }

    candidates
}
