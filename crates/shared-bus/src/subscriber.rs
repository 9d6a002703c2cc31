//! # Topology Subscriber
//!
//! Defines the subscription side of the topology bus.

use crate::events::TopologyEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// A subscription handle for receiving topology updates.
///
/// A subscriber that falls more than the bus capacity behind loses the
/// overwritten updates; delivery resumes with the oldest retained one.
pub struct Subscription {
    receiver: broadcast::Receiver<TopologyEvent>,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<TopologyEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next topology update.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next update
    /// - `None` - The bus was dropped
    pub async fn recv(&mut self) -> Option<TopologyEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some updates dropped");
                }
            }
        }
    }
}
