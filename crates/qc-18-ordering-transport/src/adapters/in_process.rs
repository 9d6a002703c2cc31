//! In-process peer transport.
//!
//! Routes frames straight to registered servers. Used by tests and by
//! deployments that run several ordering peers in one process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::PeerIdentity;
use tracing::debug;

use crate::domain::errors::TransportError;
use crate::ipc::server::OnDemandOsServer;
use crate::ports::outbound::PeerTransport;

/// Registry of servers addressable by peer identity.
#[derive(Default)]
pub struct InProcessNetwork {
    servers: RwLock<HashMap<PeerIdentity, Arc<OnDemandOsServer>>>,
}

impl InProcessNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `server` reachable as `peer`, replacing any previous server.
    pub fn register(&self, peer: PeerIdentity, server: Arc<OnDemandOsServer>) {
        debug!(peer = %peer, "Registering in-process server");
        self.servers.write().insert(peer, server);
    }

    /// Make `peer` unreachable.
    pub fn unregister(&self, peer: &PeerIdentity) -> bool {
        self.servers.write().remove(peer).is_some()
    }

    pub fn is_registered(&self, peer: &PeerIdentity) -> bool {
        self.servers.read().contains_key(peer)
    }
}

#[async_trait]
impl PeerTransport for InProcessNetwork {
    async fn call(&self, peer: &PeerIdentity, frame: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        // Lock released before awaiting the server
        let server = self
            .servers
            .read()
            .get(peer)
            .cloned()
            .ok_or_else(|| TransportError::Unreachable(peer.to_string()))?;

        server
            .handle_frame(&frame)
            .await
            .map_err(|e| TransportError::Remote(e.to_string()))
    }
}
