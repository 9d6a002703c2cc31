//! # Topology Flow
//!
//! Topology bus → listener → connection manager → new round peers.
//!
//! ## Flows Tested
//!
//! 1. **Issuer hand-over**: after a published update, proposal requests go
//!    to the new issuer and batches to the new consumers
//! 2. **Invalid assignment**: an update naming an unusable peer is rejected
//!    and traffic keeps flowing to the previous peers

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use qc_18_ordering_transport::{OdOsNotification, OnDemandConnectionManager, TopologyListener};
    use shared_bus::{InMemoryTopologyBus, TopologyEvent, TopologyPublisher};
    use shared_types::{CurrentPeers, PeerIdentity, PeerRole, Round};

    use crate::integration::fixtures::{assignment, atomic_batch, Cluster};

    /// Wait until the manager routes to `expected`.
    async fn await_peers(manager: &OnDemandConnectionManager, expected: &CurrentPeers) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while manager.current_peers() != *expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("topology update not applied in time");
    }

    #[tokio::test]
    async fn test_issuer_hand_over() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie", "delta"]);
        let manager = cluster.manager(assignment("alpha", "bravo", "charlie"));
        let bus = InMemoryTopologyBus::new();
        let listener = TopologyListener::new(manager.clone(), bus.subscribe()).spawn();

        let next = assignment("delta", "alpha", "bravo");
        bus.publish(TopologyEvent::new(Round::new(2, 0), next.clone())).await;
        await_peers(&manager, &next).await;

        manager.on_request_proposal(Round::new(2, 0)).await;
        manager.on_batches(vec![atomic_batch(&["tx"])]).await;

        assert_eq!(cluster.service("delta").proposal_requests.lock().len(), 1);
        assert!(cluster.service("alpha").proposal_requests.lock().is_empty());
        assert!(cluster.service("charlie").received.lock().is_empty());
        for name in ["delta", "alpha", "bravo"] {
            assert_eq!(cluster.service(name).received.lock().len(), 1);
        }

        drop(bus);
        listener.await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_assignment_keeps_previous_peers() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie", "delta"]);
        let original = assignment("alpha", "bravo", "charlie");
        let manager = cluster.manager(original.clone());
        let bus = InMemoryTopologyBus::new();
        let listener = TopologyListener::new(manager.clone(), bus.subscribe()).spawn();

        let mut invalid = assignment("delta", "bravo", "charlie");
        invalid[PeerRole::CommitConsumer] = PeerIdentity::new("", [0u8; 32]);
        bus.publish(TopologyEvent::new(Round::new(2, 0), invalid)).await;
        drop(bus);
        listener.await.unwrap();

        assert_eq!(manager.current_peers(), original);
        manager.on_request_proposal(Round::new(2, 0)).await;
        assert_eq!(cluster.service("alpha").proposal_requests.lock().len(), 1);
        assert!(cluster.service("delta").proposal_requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_routing_untouched() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie"]);
        let original = assignment("alpha", "bravo", "charlie");
        let manager = cluster.manager(original.clone());

        let mut invalid = original.clone();
        invalid[PeerRole::Issuer] = PeerIdentity::new(" ", [0u8; 32]);
        assert!(manager.update_peers(invalid).is_err());

        manager.on_request_proposal(Round::new(1, 0)).await;
        assert_eq!(manager.current_peers(), original);
        assert_eq!(cluster.service("alpha").proposal_requests.lock().len(), 1);
    }
}
