//! Inbound Ports (Driving Ports / API)

use async_trait::async_trait;
use shared_types::{Proposal, Round};

use crate::domain::entities::BatchCollection;

/// Notification capability of an on-demand ordering service peer.
///
/// One instance per remote peer for outbound traffic; the connection manager
/// implements it too, routing each call to the right peer(s).
#[async_trait]
pub trait OdOsNotification: Send + Sync {
    /// Forward a batch collection. Best effort: delivery failures are the
    /// implementation's concern and are not reported.
    async fn on_batches(&self, batches: BatchCollection);

    /// Ask for the proposal of `round`.
    ///
    /// `None` means no proposal is available (yet). It is a normal outcome,
    /// not a failure.
    async fn on_request_proposal(&self, round: Round) -> Option<Proposal>;
}
