//! # Topology Events
//!
//! Events published by the round-assignment driver whenever the peers
//! serving the active round change.

use serde::{Deserialize, Serialize};
use shared_types::{CurrentPeers, Round};

/// A wholesale replacement of the peer assignment.
///
/// Consumers must treat every event as a full snapshot: there are no partial
/// or incremental updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyEvent {
    /// Round the assignment becomes effective for.
    pub round: Round,
    /// Peers for every role.
    pub peers: CurrentPeers,
}

impl TopologyEvent {
    pub fn new(round: Round, peers: CurrentPeers) -> Self {
        Self { round, peers }
    }
}
