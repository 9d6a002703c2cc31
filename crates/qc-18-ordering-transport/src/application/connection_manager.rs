//! On-Demand Connection Manager
//!
//! Routes outbound ordering traffic to the peers serving the current round.
//!
//! ## Routing
//!
//! | Call | Issuer | RejectConsumer | CommitConsumer |
//! |------|--------|----------------|----------------|
//! | `on_batches` | ✓ | ✓ | ✓ |
//! | `on_request_proposal` | ✓ | | |
//!
//! ## Topology changes
//!
//! Every peer update rebuilds the whole channel set, even for roles whose
//! peer did not change. The new set is built off to the side and swapped in
//! under one exclusive lock, so a routing call sees either the old set or the
//! new one, never a mix. A failed rebuild leaves the old set in place.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{CurrentPeers, PeerCollection, Proposal, Round};
use tracing::{debug, info, warn, Instrument, Span};

use crate::domain::entities::BatchCollection;
use crate::domain::errors::ConnectionError;
use crate::metrics;
use crate::ports::inbound::OdOsNotification;
use crate::ports::outbound::OdOsNotificationFactory;

/// One live channel per role, plus the peers they were built for.
struct ConnectionSet {
    peers: CurrentPeers,
    channels: PeerCollection<Box<dyn OdOsNotification>>,
}

impl ConnectionSet {
    /// Create a channel for every role. Either all three succeed or nothing
    /// is returned.
    fn build(
        factory: &dyn OdOsNotificationFactory,
        peers: CurrentPeers,
    ) -> Result<Self, ConnectionError> {
        let channels = peers.try_map(|role, peer| {
            debug!(role = %role, peer = %peer, "Creating notification channel");
            factory.create(peer)
        })?;
        Ok(Self { peers, channels })
    }
}

/// Connection manager for the on-demand ordering service.
///
/// ## Thread Safety
///
/// Routing calls take a shared snapshot of the connection set and release the
/// lock before awaiting on any channel. Rebuilds are serialized among
/// themselves and swap the snapshot atomically.
pub struct OnDemandConnectionManager {
    factory: Arc<dyn OdOsNotificationFactory>,
    connections: RwLock<Arc<ConnectionSet>>,
    /// Serializes rebuilds so the last applied update wins.
    rebuild: Mutex<()>,
    log: Span,
}

impl OnDemandConnectionManager {
    /// Create a manager and open a channel for every role of `peers`.
    ///
    /// `log` is the span all manager activity is recorded under.
    pub fn new(
        factory: Arc<dyn OdOsNotificationFactory>,
        peers: CurrentPeers,
        log: Span,
    ) -> Result<Self, ConnectionError> {
        let connections = log.in_scope(|| ConnectionSet::build(factory.as_ref(), peers))?;
        Ok(Self {
            factory,
            connections: RwLock::new(Arc::new(connections)),
            rebuild: Mutex::new(()),
            log,
        })
    }

    /// Replace the peer assignment and rebuild every channel.
    ///
    /// On error the previous connection set stays active.
    pub fn update_peers(&self, peers: CurrentPeers) -> Result<(), ConnectionError> {
        let _enter = self.log.enter();
        let _rebuild = self.rebuild.lock();

        let next = match ConnectionSet::build(self.factory.as_ref(), peers) {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "Topology update failed, keeping previous connections");
                metrics::record_connection_rebuild("failed");
                return Err(e);
            }
        };

        info!(
            issuer = %next.peers.issuer,
            reject_consumer = %next.peers.reject_consumer,
            commit_consumer = %next.peers.commit_consumer,
            "Connections rebuilt for new peer assignment"
        );

        let previous = std::mem::replace(&mut *self.connections.write(), Arc::new(next));
        // Released outside the write lock; in-flight calls may still hold it
        drop(previous);

        metrics::record_connection_rebuild("applied");
        Ok(())
    }

    /// Peers the active connection set was built for.
    pub fn current_peers(&self) -> CurrentPeers {
        self.connections.read().peers.clone()
    }

    fn snapshot(&self) -> Arc<ConnectionSet> {
        self.connections.read().clone()
    }
}

#[async_trait]
impl OdOsNotification for OnDemandConnectionManager {
    async fn on_batches(&self, batches: BatchCollection) {
        let connections = self.snapshot();
        async move {
            debug!(batches = batches.len(), "Propagating batches to round peers");
            let channels = &connections.channels;
            futures::join!(
                channels.issuer.on_batches(batches.clone()),
                channels.reject_consumer.on_batches(batches.clone()),
                channels.commit_consumer.on_batches(batches),
            );
        }
        .instrument(self.log.clone())
        .await
    }

    async fn on_request_proposal(&self, round: Round) -> Option<Proposal> {
        let connections = self.snapshot();
        async move {
            debug!(round = %round, issuer = %connections.peers.issuer, "Requesting proposal");
            connections.channels.issuer.on_request_proposal(round).await
        }
        .instrument(self.log.clone())
        .await
    }
}
