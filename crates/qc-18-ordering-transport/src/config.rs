//! Configuration for the Ordering Transport Subsystem

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::errors::ConfigError;

/// Transport configuration.
///
/// Supplied at construction; there is no runtime reconfiguration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// How long the local ordering core may wait for a proposal (milliseconds).
    /// Zero means return immediately with whatever is available.
    pub proposal_wait_ms: u64,
    /// Bound on a full proposal round trip to a remote peer (milliseconds)
    pub proposal_request_timeout_ms: u64,
    /// Maximum transactions accepted in one batch submission (anti-DoS)
    pub max_request_transactions: usize,
    /// Maximum encoded frame size in bytes
    pub max_frame_size: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            proposal_wait_ms: 500,
            proposal_request_timeout_ms: 3_000,
            max_request_transactions: 10_000,
            max_frame_size: 16 * 1024 * 1024,
        }
    }
}

impl TransportConfig {
    pub fn proposal_wait(&self) -> Duration {
        Duration::from_millis(self.proposal_wait_ms)
    }

    pub fn proposal_request_timeout(&self) -> Duration {
        Duration::from_millis(self.proposal_request_timeout_ms)
    }

    /// Check cross-field constraints.
    ///
    /// The client round-trip bound must leave room for the remote wait,
    /// otherwise every request that waits would time out locally.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.proposal_request_timeout_ms == 0 {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        if self.proposal_request_timeout_ms <= self.proposal_wait_ms {
            return Err(ConfigError::RequestTimeoutTooShort {
                timeout_ms: self.proposal_request_timeout_ms,
                wait_ms: self.proposal_wait_ms,
            });
        }
        if self.max_request_transactions == 0 {
            return Err(ConfigError::ZeroLimit("max_request_transactions"));
        }
        if self.max_frame_size == 0 {
            return Err(ConfigError::ZeroLimit("max_frame_size"));
        }
        Ok(())
    }
}
