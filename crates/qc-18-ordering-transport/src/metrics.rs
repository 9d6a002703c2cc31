//! # Ordering Transport Metrics
//!
//! Prometheus metrics for the on-demand ordering transport.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-ordering-transport = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `odos_batches_received_total` - Counter of batches forwarded to the ordering core
//! - `odos_batches_dropped_total` - Counter of malformed batches dropped
//! - `odos_transactions_dropped_total` - Counter of undecodable or invalid transactions dropped
//! - `odos_proposal_requests_total` - Counter of proposal requests served (by outcome)
//! - `odos_connection_rebuilds_total` - Counter of connection set rebuilds (by outcome)
//! - `odos_outbound_failures_total` - Counter of failed outbound calls (by operation)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref BATCHES_RECEIVED: IntCounter = register_int_counter!(
        "odos_batches_received_total",
        "Total number of batches forwarded to the ordering core"
    )
    .expect("Failed to create BATCHES_RECEIVED metric");

    pub static ref BATCHES_DROPPED: IntCounter = register_int_counter!(
        "odos_batches_dropped_total",
        "Total number of malformed batches dropped"
    )
    .expect("Failed to create BATCHES_DROPPED metric");

    pub static ref TRANSACTIONS_DROPPED: IntCounter = register_int_counter!(
        "odos_transactions_dropped_total",
        "Total number of undecodable or invalid transactions dropped"
    )
    .expect("Failed to create TRANSACTIONS_DROPPED metric");

    /// Proposal requests served, labeled by outcome (present, absent)
    pub static ref PROPOSAL_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "odos_proposal_requests_total",
        "Total number of proposal requests served",
        &["outcome"]
    )
    .expect("Failed to create PROPOSAL_REQUESTS metric");

    /// Connection set rebuilds, labeled by outcome (applied, failed)
    pub static ref CONNECTION_REBUILDS: IntCounterVec = register_int_counter_vec!(
        "odos_connection_rebuilds_total",
        "Total number of connection set rebuilds",
        &["outcome"]
    )
    .expect("Failed to create CONNECTION_REBUILDS metric");

    /// Failed outbound calls, labeled by operation
    pub static ref OUTBOUND_FAILURES: IntCounterVec = register_int_counter_vec!(
        "odos_outbound_failures_total",
        "Total number of failed outbound calls",
        &["operation"]
    )
    .expect("Failed to create OUTBOUND_FAILURES metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_batches_received(count: usize) {
    BATCHES_RECEIVED.inc_by(count as u64);
}

#[cfg(feature = "metrics")]
pub fn record_batches_dropped(count: usize) {
    BATCHES_DROPPED.inc_by(count as u64);
}

#[cfg(feature = "metrics")]
pub fn record_transactions_dropped(count: usize) {
    TRANSACTIONS_DROPPED.inc_by(count as u64);
}

/// Record a served proposal request with its outcome
#[cfg(feature = "metrics")]
pub fn record_proposal_request(outcome: &str) {
    PROPOSAL_REQUESTS.with_label_values(&[outcome]).inc();
}

/// Record a connection set rebuild with its outcome
#[cfg(feature = "metrics")]
pub fn record_connection_rebuild(outcome: &str) {
    CONNECTION_REBUILDS.with_label_values(&[outcome]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_outbound_failure(operation: &str) {
    OUTBOUND_FAILURES.with_label_values(&[operation]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_batches_received(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_batches_dropped(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_transactions_dropped(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_proposal_request(_outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_connection_rebuild(_outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_outbound_failure(_operation: &str) {}
