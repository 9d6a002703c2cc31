//! Adapters for the Ordering Transport
//!
//! - `batch_factory`: default batch construction and stateless validation
//! - `client`: wire client channel and its factory
//! - `in_process`: in-process peer transport
//! - `topology`: topology bus listener driving the connection manager

pub mod batch_factory;
pub mod client;
pub mod in_process;
pub mod topology;

pub use batch_factory::{DefaultTransactionBatchFactory, StatelessTransactionValidator};
pub use client::{WireOdOsClient, WireOdOsClientFactory};
pub use in_process::InProcessNetwork;
pub use topology::TopologyListener;
