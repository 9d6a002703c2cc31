//! # Round Topology
//!
//! Peer roles for a consensus round and the total role → value mapping used
//! both for peer assignments and for the per-role channel set.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::entities::PeerIdentity;

/// Functional slot filled by a peer for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeerRole {
    /// Produces the proposal for the round.
    Issuer,
    /// Consumes batches if the round is rejected.
    RejectConsumer,
    /// Consumes batches if the round is committed.
    CommitConsumer,
}

impl PeerRole {
    /// All roles in routing order.
    pub const ALL: [PeerRole; 3] = [
        PeerRole::Issuer,
        PeerRole::RejectConsumer,
        PeerRole::CommitConsumer,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PeerRole::Issuer => "issuer",
            PeerRole::RejectConsumer => "reject_consumer",
            PeerRole::CommitConsumer => "commit_consumer",
        }
    }
}

impl fmt::Display for PeerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A total mapping from every [`PeerRole`] to a value.
///
/// There is no way to build a partial collection: every constructor takes a
/// value for each role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerCollection<T> {
    pub issuer: T,
    pub reject_consumer: T,
    pub commit_consumer: T,
}

impl<T> PeerCollection<T> {
    pub fn new(issuer: T, reject_consumer: T, commit_consumer: T) -> Self {
        Self {
            issuer,
            reject_consumer,
            commit_consumer,
        }
    }

    /// Build a collection by evaluating `f` once per role, in routing order.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(PeerRole) -> T,
    {
        Self::new(
            f(PeerRole::Issuer),
            f(PeerRole::RejectConsumer),
            f(PeerRole::CommitConsumer),
        )
    }

    /// Fallible per-role mapping. Stops at the first error; nothing partial
    /// escapes.
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<PeerCollection<U>, E>
    where
        F: FnMut(PeerRole, &T) -> Result<U, E>,
    {
        Ok(PeerCollection::new(
            f(PeerRole::Issuer, &self.issuer)?,
            f(PeerRole::RejectConsumer, &self.reject_consumer)?,
            f(PeerRole::CommitConsumer, &self.commit_consumer)?,
        ))
    }

    /// `(role, value)` pairs in routing order.
    pub fn iter(&self) -> impl Iterator<Item = (PeerRole, &T)> {
        PeerRole::ALL.into_iter().map(move |role| (role, &self[role]))
    }
}

impl<T> Index<PeerRole> for PeerCollection<T> {
    type Output = T;

    fn index(&self, role: PeerRole) -> &T {
        match role {
            PeerRole::Issuer => &self.issuer,
            PeerRole::RejectConsumer => &self.reject_consumer,
            PeerRole::CommitConsumer => &self.commit_consumer,
        }
    }
}

impl<T> IndexMut<PeerRole> for PeerCollection<T> {
    fn index_mut(&mut self, role: PeerRole) -> &mut T {
        match role {
            PeerRole::Issuer => &mut self.issuer,
            PeerRole::RejectConsumer => &mut self.reject_consumer,
            PeerRole::CommitConsumer => &mut self.commit_consumer,
        }
    }
}

/// Peers assigned to each role for the active round.
pub type CurrentPeers = PeerCollection<PeerIdentity>;
