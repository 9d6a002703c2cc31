//! Shared fixtures for the integration flows.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use qc_18_ordering_transport::{
    BatchCollection, DefaultTransactionBatchFactory, InProcessNetwork, OnDemandConnectionManager,
    OnDemandOrderingService, OnDemandOsServer, StatelessTransactionValidator, TransportConfig,
    WireOdOsClientFactory,
};
use shared_types::{
    BatchMeta, BatchType, CurrentPeers, PeerCollection, PeerIdentity, Proposal, ReducedPayload,
    Round, Signatory, Transaction, TransactionBatch,
};
use tracing::info_span;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Local ordering core that records what the transport hands it.
#[derive(Default)]
pub struct RecordingOrderingService {
    pub received: Mutex<Vec<BatchCollection>>,
    pub proposal_requests: Mutex<Vec<(Round, Duration)>>,
    pub proposal: Mutex<Option<Proposal>>,
    pub has_enough: AtomicBool,
}

impl RecordingOrderingService {
    pub fn serve(&self, proposal: Proposal, has_enough: bool) {
        *self.proposal.lock() = Some(proposal);
        self.has_enough.store(has_enough, Ordering::SeqCst);
    }

    /// Creators of every received batch, per call.
    pub fn received_creators(&self) -> Vec<Vec<Vec<String>>> {
        self.received
            .lock()
            .iter()
            .map(|collection| {
                collection
                    .iter()
                    .map(|batch| {
                        batch
                            .transactions()
                            .iter()
                            .map(|tx| tx.creator_account_id().to_string())
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}

#[async_trait]
impl OnDemandOrderingService for RecordingOrderingService {
    async fn on_batches(&self, batches: BatchCollection) {
        self.received.lock().push(batches);
    }

    async fn on_request_proposal(&self, round: Round, wait: Duration) -> Option<Proposal> {
        self.proposal_requests.lock().push((round, wait));
        self.proposal.lock().clone()
    }

    fn has_enough_batches_in_cache(&self) -> bool {
        self.has_enough.load(Ordering::SeqCst)
    }
}

pub fn peer(name: &str) -> PeerIdentity {
    PeerIdentity::new(format!("{name}:10001"), [name.as_bytes()[0]; 32])
}

pub fn assignment(issuer: &str, reject: &str, commit: &str) -> CurrentPeers {
    PeerCollection::new(peer(issuer), peer(reject), peer(commit))
}

pub fn signed_tx(creator: &str) -> Transaction {
    Transaction::new(ReducedPayload {
        commands: vec![creator.as_bytes().to_vec()],
        creator_account_id: creator.to_string(),
        created_time: 1_700_000_000_000,
        quorum: 1,
    })
    .with_signature(Signatory {
        public_key: [0x11; 32],
        signature: vec![0x22; 64],
    })
}

/// A well-formed atomic batch over the given creators.
pub fn atomic_batch(creators: &[&str]) -> Arc<TransactionBatch> {
    let txs: Vec<_> = creators.iter().map(|c| signed_tx(c)).collect();
    let meta = BatchMeta {
        batch_type: BatchType::Atomic,
        reduced_hashes: txs.iter().map(Transaction::reduced_hash).collect(),
    };
    let txs = txs.into_iter().map(|tx| tx.with_batch_meta(meta.clone())).collect();
    Arc::new(TransactionBatch::new(txs).unwrap())
}

/// Named ordering peers, each with a wire server, on one in-process network.
pub struct Cluster {
    pub network: Arc<InProcessNetwork>,
    pub config: TransportConfig,
    services: HashMap<String, Arc<RecordingOrderingService>>,
}

impl Cluster {
    pub fn new(names: &[&str]) -> Self {
        init_tracing();
        let network = Arc::new(InProcessNetwork::new());
        let config = TransportConfig::default();
        let mut services = HashMap::new();

        for name in names {
            let service = Arc::new(RecordingOrderingService::default());
            let server = OnDemandOsServer::new(
                service.clone(),
                Arc::new(StatelessTransactionValidator),
                Arc::new(DefaultTransactionBatchFactory),
                config.clone(),
                info_span!("OdOsServer", peer = *name),
            )
            .unwrap();
            network.register(peer(name), Arc::new(server));
            services.insert(name.to_string(), service);
        }

        Self {
            network,
            config,
            services,
        }
    }

    pub fn service(&self, name: &str) -> Arc<RecordingOrderingService> {
        self.services[name].clone()
    }

    /// Connection manager on the cluster's network with the given assignment.
    pub fn manager(&self, peers: CurrentPeers) -> Arc<OnDemandConnectionManager> {
        let factory = Arc::new(
            WireOdOsClientFactory::new(self.network.clone(), self.config.clone()).unwrap(),
        );
        Arc::new(
            OnDemandConnectionManager::new(factory, peers, info_span!("OsConnectionManager"))
                .unwrap(),
        )
    }
}
