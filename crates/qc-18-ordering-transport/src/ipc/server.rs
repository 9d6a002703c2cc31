//! Wire Transport Server
//!
//! Inbound side of the on-demand ordering service: accepts batch submissions
//! and proposal requests from remote peers and forwards them to the local
//! ordering core.
//!
//! ## Boundaries
//!
//! - Oversized submissions and frames are rejected before any parsing
//! - Transactions failing conversion or validation are dropped individually
//! - Malformed batch groups are dropped; surviving groups keep their order
//! - A submitter always receives an empty acknowledgment

use std::sync::Arc;

use shared_types::{Round, Transaction};
use tracing::{debug, warn, Instrument, Span};

use crate::config::TransportConfig;
use crate::domain::batch_parser::parse_batches;
use crate::domain::entities::BatchCollection;
use crate::domain::errors::{ConfigError, ProtocolError};
use crate::ipc::codec;
use crate::ipc::payloads::{
    Ack, BatchesRequest, OdOsRequest, OdOsResponse, ProposalRequest, ProposalResponse,
    WireProposal, WireTransaction,
};
use crate::metrics;
use crate::ports::outbound::{
    OnDemandOrderingService, TransactionBatchFactory, TransactionValidator,
};

/// Server half of the on-demand ordering transport.
///
/// Stateless per request; requests may be handled concurrently.
pub struct OnDemandOsServer {
    ordering_service: Arc<dyn OnDemandOrderingService>,
    validator: Arc<dyn TransactionValidator>,
    batch_factory: Arc<dyn TransactionBatchFactory>,
    config: TransportConfig,
    log: Span,
}

impl OnDemandOsServer {
    /// Fails if `config` does not validate.
    pub fn new(
        ordering_service: Arc<dyn OnDemandOrderingService>,
        validator: Arc<dyn TransactionValidator>,
        batch_factory: Arc<dyn TransactionBatchFactory>,
        config: TransportConfig,
        log: Span,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ordering_service,
            validator,
            batch_factory,
            config,
            log,
        })
    }

    /// Handle a `SendBatches` request.
    ///
    /// Only an oversized request fails. Everything else is acknowledged,
    /// including requests whose batches were all dropped.
    pub async fn send_batches(&self, request: BatchesRequest) -> Result<Ack, ProtocolError> {
        let count = request.transactions.len();
        if count > self.config.max_request_transactions {
            warn!(
                "[qc-18] SendBatches with {} transactions exceeds max {}",
                count, self.config.max_request_transactions
            );
            return Err(ProtocolError::RequestTooLarge {
                count,
                max: self.config.max_request_transactions,
            });
        }

        let batches = self.log.in_scope(|| self.build_batches(request.transactions));

        async {
            debug!(
                batches = batches.len(),
                transactions = count,
                "[qc-18] Forwarding received batches to ordering service"
            );
            metrics::record_batches_received(batches.len());
            self.ordering_service.on_batches(batches).await;
        }
        .instrument(self.log.clone())
        .await;

        Ok(Ack)
    }

    /// Handle a `RequestProposal` request.
    ///
    /// The local core may wait up to the configured proposal wait. No
    /// proposal is a normal answer; the cache hint is always attached.
    pub async fn request_proposal(
        &self,
        request: ProposalRequest,
    ) -> Result<ProposalResponse, ProtocolError> {
        let round: Round = match request.round {
            Some(round) => round.into(),
            None => {
                warn!("[qc-18] RequestProposal without a round");
                return Err(ProtocolError::MissingRound);
            }
        };

        let response = async {
            let proposal = self
                .ordering_service
                .on_request_proposal(round, self.config.proposal_wait())
                .await;
            let has_enough_batches_in_cache = self.ordering_service.has_enough_batches_in_cache();

            debug!(
                round = %round,
                has_proposal = proposal.is_some(),
                has_enough_batches_in_cache,
                "[qc-18] Answering proposal request"
            );
            metrics::record_proposal_request(if proposal.is_some() {
                "present"
            } else {
                "absent"
            });

            ProposalResponse {
                proposal: proposal.as_ref().map(WireProposal::from),
                has_enough_batches_in_cache,
            }
        }
        .instrument(self.log.clone())
        .await;

        Ok(response)
    }

    /// Decode a request frame, dispatch it and encode the response frame.
    pub async fn handle_frame(&self, frame: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        let request: OdOsRequest = codec::decode(frame, self.config.max_frame_size)?;
        let response = match request {
            OdOsRequest::SendBatches(request) => OdOsResponse::Ack(self.send_batches(request).await?),
            OdOsRequest::RequestProposal(request) => {
                OdOsResponse::Proposal(self.request_proposal(request).await?)
            }
        };
        codec::encode(&response, self.config.max_frame_size)
    }

    fn build_batches(&self, wire: Vec<WireTransaction>) -> BatchCollection {
        let transactions = self.deserialize_transactions(wire);
        let groups = parse_batches(transactions);
        let group_count = groups.len();

        let batches: BatchCollection = groups
            .into_iter()
            .filter_map(|group| {
                let size = group.len();
                match self.batch_factory.create_transaction_batch(group) {
                    Ok(batch) => Some(Arc::new(batch)),
                    Err(e) => {
                        warn!(size, error = %e, "[qc-18] Dropping malformed batch");
                        None
                    }
                }
            })
            .collect();

        metrics::record_batches_dropped(group_count - batches.len());
        batches
    }

    fn deserialize_transactions(&self, wire: Vec<WireTransaction>) -> Vec<Transaction> {
        let received = wire.len();
        let transactions: Vec<Transaction> = wire
            .into_iter()
            .enumerate()
            .filter_map(|(index, wire_tx)| {
                let tx = match Transaction::try_from(wire_tx) {
                    Ok(tx) => tx,
                    Err(e) => {
                        warn!(index, error = %e, "[qc-18] Dropping undecodable transaction");
                        return None;
                    }
                };
                match self.validator.validate(&tx) {
                    Ok(()) => Some(tx),
                    Err(e) => {
                        warn!(index, error = %e, "[qc-18] Dropping invalid transaction");
                        None
                    }
                }
            })
            .collect();

        metrics::record_transactions_dropped(received - transactions.len());
        transactions
    }
}
