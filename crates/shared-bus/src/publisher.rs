//! # Topology Publisher
//!
//! Defines the publishing side of the topology bus.

use crate::events::TopologyEvent;
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Trait for publishing topology updates.
///
/// The round-assignment driver uses this to announce new peer sets.
#[async_trait]
pub trait TopologyPublisher: Send + Sync {
    /// Publish an update to every current subscriber.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    async fn publish(&self, event: TopologyEvent) -> usize;
}

/// In-memory implementation of the topology bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
pub struct InMemoryTopologyBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<TopologyEvent>,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryTopologyBus {
    /// Create a new bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            capacity,
        }
    }

    /// Subscribe to topology updates published from now on.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        debug!("New topology subscription created");
        Subscription::new(self.sender.subscribe())
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryTopologyBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TopologyPublisher for InMemoryTopologyBus {
    async fn publish(&self, event: TopologyEvent) -> usize {
        let round = event.round;

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    round = %round,
                    receivers = receiver_count,
                    "Topology update published"
                );
                receiver_count
            }
            Err(e) => {
                warn!(
                    round = %round,
                    error = %e,
                    "Topology update dropped (no receivers)"
                );
                0
            }
        }
    }
}
