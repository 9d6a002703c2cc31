//! # qc-18-ordering-transport
//!
//! Network transport for the on-demand ordering service.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Connection Manager**: routes batches to every peer of the current
//!   round and proposal requests to the round's issuer
//! - **Notification Channels**: per-peer clients built by an injected factory
//! - **Wire Server**: accepts batch submissions and proposal requests from
//!   remote peers and forwards them to the local ordering core
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!  Topology bus ───→ │ OnDemandConnectionManager    │
//!                    │  Issuer ───────── onBatches, onRequestProposal
//!                    │  RejectConsumer ─ onBatches
//!                    │  CommitConsumer ─ onBatches
//!                    └──────────────┬───────────────┘
//!                                   │ WireOdOsClient (PeerTransport)
//!                                   ▼
//!                    ┌──────────────────────────────┐
//!  remote peer ────→ │ OnDemandOsServer             │ ───→ OnDemandOrderingService
//!                    │  SendBatches → Ack           │       (local ordering core)
//!                    │  RequestProposal → Proposal? │
//!                    └──────────────────────────────┘
//! ```
//!
//! ## Routing
//!
//! | Call | Issuer | RejectConsumer | CommitConsumer |
//! |------|--------|----------------|----------------|
//! | `on_batches` | ✓ | ✓ | ✓ |
//! | `on_request_proposal` | ✓ | | |
//!
//! ## Example
//!
//! ```rust,ignore
//! use qc_18_ordering_transport::{
//!     InProcessNetwork, OnDemandConnectionManager, TopologyListener, TransportConfig,
//!     WireOdOsClientFactory,
//! };
//!
//! let network = Arc::new(InProcessNetwork::new());
//! let factory = Arc::new(WireOdOsClientFactory::new(network, TransportConfig::default())?);
//! let manager = Arc::new(OnDemandConnectionManager::new(
//!     factory,
//!     initial_peers,
//!     tracing::info_span!("OsConnectionManager"),
//! )?);
//!
//! TopologyListener::new(manager.clone(), bus.subscribe()).spawn();
//!
//! manager.on_batches(batches).await;
//! let proposal = manager.on_request_proposal(round).await;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod metrics;
pub mod ports;

pub use adapters::{
    DefaultTransactionBatchFactory, InProcessNetwork, StatelessTransactionValidator,
    TopologyListener, WireOdOsClient, WireOdOsClientFactory,
};
pub use application::OnDemandConnectionManager;
pub use config::TransportConfig;
pub use domain::{
    parse_batches, BatchCollection, ConfigError, ConnectionError, ConversionError,
    ProtocolError, TransactionValidationError, TransportError,
};
pub use ipc::OnDemandOsServer;
pub use ports::{
    OdOsNotification, OdOsNotificationFactory, OnDemandOrderingService, PeerTransport,
    TransactionBatchFactory, TransactionValidator,
};
