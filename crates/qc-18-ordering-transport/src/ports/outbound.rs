//! Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities this subsystem consumes. Implementations are injected at
//! construction.

use std::time::Duration;

use async_trait::async_trait;
use shared_types::{BatchError, PeerIdentity, Proposal, Round, Transaction, TransactionBatch};

use crate::domain::entities::BatchCollection;
use crate::domain::errors::{ConnectionError, TransactionValidationError, TransportError};
use crate::ports::inbound::OdOsNotification;

/// Builds the notification channel for one peer.
///
/// Called once per role on every topology change, possibly many times for
/// the same peer. Ownership of the returned channel passes to the caller;
/// dropping it must release whatever the channel holds.
pub trait OdOsNotificationFactory: Send + Sync {
    fn create(&self, peer: &PeerIdentity) -> Result<Box<dyn OdOsNotification>, ConnectionError>;
}

/// The local ordering core.
///
/// Owns the batch cache and proposal construction. This layer only forwards
/// to it.
#[async_trait]
pub trait OnDemandOrderingService: Send + Sync {
    /// Accept batches received from the network.
    async fn on_batches(&self, batches: BatchCollection);

    /// Produce the proposal for `round`, waiting at most `wait` for enough
    /// batches to arrive.
    async fn on_request_proposal(&self, round: Round, wait: Duration) -> Option<Proposal>;

    /// Whether enough batches are cached for a proposal to be likely soon.
    fn has_enough_batches_in_cache(&self) -> bool;
}

/// Validates and materializes a candidate group into a batch.
pub trait TransactionBatchFactory: Send + Sync {
    fn create_transaction_batch(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<TransactionBatch, BatchError>;
}

/// Stateless per-transaction validation applied to inbound wire traffic.
pub trait TransactionValidator: Send + Sync {
    fn validate(&self, transaction: &Transaction) -> Result<(), TransactionValidationError>;
}

/// Byte-level request/response transport to a peer.
///
/// Sockets, TLS and connection pooling live behind this trait.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Deliver `frame` to `peer` and return its reply frame.
    async fn call(&self, peer: &PeerIdentity, frame: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}
