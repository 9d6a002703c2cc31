//! Topology listener.
//!
//! Drains a topology bus subscription and applies every peer assignment to
//! the connection manager. Runs on its own task, separate from request
//! handling.

use std::sync::Arc;

use shared_bus::Subscription;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::application::connection_manager::OnDemandConnectionManager;

pub struct TopologyListener {
    manager: Arc<OnDemandConnectionManager>,
    subscription: Subscription,
}

impl TopologyListener {
    pub fn new(manager: Arc<OnDemandConnectionManager>, subscription: Subscription) -> Self {
        Self {
            manager,
            subscription,
        }
    }

    /// Apply updates until the bus closes.
    ///
    /// A failed rebuild is logged and the previous connections stay active;
    /// the next update is applied as usual.
    pub async fn run(mut self) {
        info!("[qc-18] Topology listener started");
        while let Some(event) = self.subscription.recv().await {
            debug!(round = %event.round, "[qc-18] Applying topology update");
            if let Err(e) = self.manager.update_peers(event.peers) {
                error!(
                    round = %event.round,
                    error = %e,
                    "[qc-18] Failed to rebuild connections for round"
                );
            }
        }
        info!("[qc-18] Topology bus closed, listener stopped");
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::mocks::MockNotificationFactory;
    use shared_bus::{InMemoryTopologyBus, TopologyEvent, TopologyPublisher};
    use shared_types::{CurrentPeers, PeerCollection, PeerIdentity, Round};
    use tracing::info_span;

    fn peers(issuer: &str) -> CurrentPeers {
        PeerCollection::new(
            PeerIdentity::new(issuer, [1u8; 32]),
            PeerIdentity::new("reject:1", [2u8; 32]),
            PeerIdentity::new("commit:1", [3u8; 32]),
        )
    }

    fn manager(factory: &Arc<MockNotificationFactory>) -> Arc<OnDemandConnectionManager> {
        Arc::new(
            OnDemandConnectionManager::new(
                factory.clone(),
                peers("initial:1"),
                info_span!("OsConnectionManager"),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_applies_updates_until_bus_closes() {
        let factory = Arc::new(MockNotificationFactory::new());
        let manager = manager(&factory);
        let bus = InMemoryTopologyBus::new();
        let handle = TopologyListener::new(manager.clone(), bus.subscribe()).spawn();

        bus.publish(TopologyEvent::new(Round::new(1, 0), peers("a:1"))).await;
        bus.publish(TopologyEvent::new(Round::new(2, 0), peers("b:1"))).await;
        drop(bus);
        handle.await.unwrap();

        assert_eq!(manager.current_peers(), peers("b:1"));
        assert_eq!(factory.create_count(), 9);
    }

    #[tokio::test]
    async fn test_failed_update_does_not_stop_listener() {
        let factory = Arc::new(MockNotificationFactory::new());
        factory.fail_for(PeerIdentity::new("bad:1", [1u8; 32]));
        let manager = manager(&factory);
        let bus = InMemoryTopologyBus::new();
        let handle = TopologyListener::new(manager.clone(), bus.subscribe()).spawn();

        bus.publish(TopologyEvent::new(Round::new(1, 0), peers("bad:1"))).await;
        assert_eq!(manager.current_peers(), peers("initial:1"));

        bus.publish(TopologyEvent::new(Round::new(2, 0), peers("good:1"))).await;
        drop(bus);
        handle.await.unwrap();

        assert_eq!(manager.current_peers(), peers("good:1"));
    }
}
