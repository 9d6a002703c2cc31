//! # Ordering Flow
//!
//! Connection manager → wire client → in-process network → wire server →
//! local ordering core.
//!
//! ## Flows Tested
//!
//! 1. **Batch propagation**: one collection reaches the cores of all three
//!    round peers, in order
//! 2. **Proposal request**: only the issuer's core is asked; the proposal
//!    comes back intact
//! 3. **Malformed batches**: a tampered batch is dropped by the receiving
//!    server while the rest of the collection is delivered
//! 4. **Unreachable issuer**: the request degrades to "no proposal"

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use qc_18_ordering_transport::OdOsNotification;
    use shared_types::{PeerIdentity, PeerRole, Proposal, Round, TransactionBatch};

    use crate::integration::fixtures::{assignment, atomic_batch, signed_tx, Cluster};

    fn strings(creators: &[&str]) -> Vec<String> {
        creators.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_batches_reach_every_round_peer() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie", "delta"]);
        let manager = cluster.manager(assignment("alpha", "bravo", "charlie"));

        manager
            .on_batches(vec![atomic_batch(&["a1", "a2"]), atomic_batch(&["b1"])])
            .await;

        for name in ["alpha", "bravo", "charlie"] {
            assert_eq!(
                cluster.service(name).received_creators(),
                vec![vec![strings(&["a1", "a2"]), strings(&["b1"])]],
                "peer {name} should receive the full collection"
            );
        }
        assert!(cluster.service("delta").received.lock().is_empty());
    }

    #[tokio::test]
    async fn test_proposal_requested_from_issuer_only() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie"]);
        let proposal = Proposal::new(1, 1_700_000_000_000, vec![signed_tx("test")]);
        cluster.service("alpha").serve(proposal.clone(), true);
        let manager = cluster.manager(assignment("alpha", "bravo", "charlie"));

        let received = manager.on_request_proposal(Round::new(1, 2)).await;

        assert_eq!(received, Some(proposal));
        assert_eq!(
            *cluster.service("alpha").proposal_requests.lock(),
            vec![(Round::new(1, 2), cluster.config.proposal_wait())]
        );
        assert!(cluster.service("bravo").proposal_requests.lock().is_empty());
        assert!(cluster.service("charlie").proposal_requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_no_proposal_is_not_an_error() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie"]);
        let manager = cluster.manager(assignment("alpha", "bravo", "charlie"));

        let received = manager.on_request_proposal(Round::new(4, 0)).await;

        assert_eq!(received, None);
        assert_eq!(cluster.service("alpha").proposal_requests.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_tampered_batch_dropped_on_receipt() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie"]);
        let manager = cluster.manager(assignment("alpha", "bravo", "charlie"));

        // Meta declares three members, only two are sent
        let incomplete = atomic_batch(&["x1", "x2", "x3"]);
        let truncated = TransactionBatch::new(incomplete.transactions()[..2].to_vec()).unwrap();

        manager
            .on_batches(vec![
                atomic_batch(&["first"]),
                Arc::new(truncated),
                atomic_batch(&["last"]),
            ])
            .await;

        for name in ["alpha", "bravo", "charlie"] {
            assert_eq!(
                cluster.service(name).received_creators(),
                vec![vec![strings(&["first"]), strings(&["last"])]]
            );
        }
    }

    #[tokio::test]
    async fn test_unreachable_issuer_yields_no_proposal() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie"]);
        cluster
            .service("alpha")
            .serve(Proposal::new(1, 0, vec![signed_tx("test")]), true);
        let manager = cluster.manager(assignment("alpha", "bravo", "charlie"));
        cluster
            .network
            .unregister(&manager.current_peers()[PeerRole::Issuer]);

        let request = manager.on_request_proposal(Round::new(1, 0));
        let received = tokio::time::timeout(Duration::from_secs(5), request)
            .await
            .expect("request should not hang");

        assert_eq!(received, None);
        assert!(cluster.service("alpha").proposal_requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_consumer_does_not_block_others() {
        let cluster = Cluster::new(&["alpha", "bravo", "charlie"]);
        let manager = cluster.manager(assignment("alpha", "bravo", "charlie"));
        let charlie: PeerIdentity = manager.current_peers()[PeerRole::CommitConsumer].clone();
        cluster.network.unregister(&charlie);

        manager.on_batches(vec![atomic_batch(&["tx"])]).await;

        assert_eq!(cluster.service("alpha").received.lock().len(), 1);
        assert_eq!(cluster.service("bravo").received.lock().len(), 1);
        assert!(cluster.service("charlie").received.lock().is_empty());
    }
}
