//! Wire client channel.
//!
//! `OdOsNotification` for one remote peer: requests are encoded into frames
//! and sent through a [`PeerTransport`]. Failures are logged and never
//! retried.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{PeerIdentity, Proposal, Round};
use tracing::{debug, warn};

use crate::config::TransportConfig;
use crate::domain::entities::{collection_transactions, BatchCollection};
use crate::domain::errors::{ConfigError, ConnectionError, ProtocolError, TransportError};
use crate::ipc::codec;
use crate::ipc::payloads::{
    BatchesRequest, OdOsRequest, OdOsResponse, ProposalRequest, WireTransaction,
};
use crate::metrics;
use crate::ports::inbound::OdOsNotification;
use crate::ports::outbound::{OdOsNotificationFactory, PeerTransport};

/// Notification channel to a single remote peer.
pub struct WireOdOsClient {
    peer: PeerIdentity,
    transport: Arc<dyn PeerTransport>,
    config: TransportConfig,
}

impl WireOdOsClient {
    pub fn new(
        peer: PeerIdentity,
        transport: Arc<dyn PeerTransport>,
        config: TransportConfig,
    ) -> Self {
        Self {
            peer,
            transport,
            config,
        }
    }

    async fn call(&self, request: &OdOsRequest) -> Result<OdOsResponse, TransportError> {
        let frame = codec::encode(request, self.config.max_frame_size)?;
        let reply = self.transport.call(&self.peer, frame).await?;
        Ok(codec::decode(&reply, self.config.max_frame_size)?)
    }

    async fn request_proposal(&self, round: Round) -> Result<Option<Proposal>, TransportError> {
        let request = OdOsRequest::RequestProposal(ProposalRequest {
            round: Some(round.into()),
        });
        let response = match self.call(&request).await? {
            OdOsResponse::Proposal(response) => response,
            OdOsResponse::Ack(_) => {
                return Err(ProtocolError::UnexpectedMessage {
                    expected: "Proposal",
                }
                .into())
            }
        };

        debug!(
            peer = %self.peer,
            round = %round,
            has_proposal = response.has_proposal(),
            has_enough_batches_in_cache = response.has_enough_batches_in_cache,
            "Proposal response received"
        );

        response
            .proposal
            .map(Proposal::try_from)
            .transpose()
            .map_err(|e| ProtocolError::Decode(e.to_string()).into())
    }
}

#[async_trait]
impl OdOsNotification for WireOdOsClient {
    async fn on_batches(&self, batches: BatchCollection) {
        let request = OdOsRequest::SendBatches(BatchesRequest {
            transactions: collection_transactions(&batches)
                .map(WireTransaction::from)
                .collect(),
        });

        match self.call(&request).await {
            Ok(OdOsResponse::Ack(_)) => {
                debug!(peer = %self.peer, batches = batches.len(), "Batches delivered");
            }
            Ok(OdOsResponse::Proposal(_)) => {
                warn!(peer = %self.peer, "Unexpected reply to SendBatches");
                metrics::record_outbound_failure("on_batches");
            }
            Err(e) => {
                warn!(peer = %self.peer, error = %e, "Failed to send batches");
                metrics::record_outbound_failure("on_batches");
            }
        }
    }

    async fn on_request_proposal(&self, round: Round) -> Option<Proposal> {
        let timeout = self.config.proposal_request_timeout();
        match tokio::time::timeout(timeout, self.request_proposal(round)).await {
            Ok(Ok(proposal)) => proposal,
            Ok(Err(e)) => {
                warn!(peer = %self.peer, round = %round, error = %e, "Proposal request failed");
                metrics::record_outbound_failure("on_request_proposal");
                None
            }
            Err(_) => {
                let e = TransportError::Timeout(self.config.proposal_request_timeout_ms);
                warn!(peer = %self.peer, round = %round, error = %e, "Proposal request failed");
                metrics::record_outbound_failure("on_request_proposal");
                None
            }
        }
    }
}

/// Creates [`WireOdOsClient`] channels over a shared transport.
///
/// Creation does no I/O; the first request opens whatever the transport
/// needs.
pub struct WireOdOsClientFactory {
    transport: Arc<dyn PeerTransport>,
    config: TransportConfig,
}

impl WireOdOsClientFactory {
    /// Fails if `config` does not validate; every channel it creates shares
    /// the checked config.
    pub fn new(
        transport: Arc<dyn PeerTransport>,
        config: TransportConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { transport, config })
    }
}

impl OdOsNotificationFactory for WireOdOsClientFactory {
    fn create(&self, peer: &PeerIdentity) -> Result<Box<dyn OdOsNotification>, ConnectionError> {
        if peer.address.trim().is_empty() {
            return Err(ConnectionError::InvalidPeer {
                peer: peer.to_string(),
                reason: "empty address".to_string(),
            });
        }
        Ok(Box::new(WireOdOsClient::new(
            peer.clone(),
            self.transport.clone(),
            self.config.clone(),
        )))
    }
}
