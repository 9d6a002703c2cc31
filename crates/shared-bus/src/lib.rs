//! # Shared Bus - Topology Updates
//!
//! Carries peer-assignment updates from the round-assignment driver to the
//! ordering transport.
//!
//! ```text
//! ┌────────────────────┐                    ┌──────────────────────┐
//! │ Round assignment   │                    │ Ordering transport   │
//! │ driver             │    publish()       │ (connection manager) │
//! │                    │ ──────┐            │                      │
//! └────────────────────┘       │            └──────────────────────┘
//!                              ▼                       ↑
//!                        ┌──────────────┐              │
//!                        │ Topology Bus │ ─────────────┘
//!                        └──────────────┘   subscribe()
//! ```
//!
//! Every event is a complete peer assignment. Subscribers never need earlier
//! events to interpret a later one.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::TopologyEvent;
pub use publisher::{InMemoryTopologyBus, TopologyPublisher};
pub use subscriber::Subscription;

/// Maximum updates to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
