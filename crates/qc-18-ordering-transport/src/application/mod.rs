//! Application layer for the Ordering Transport
//!
//! Outbound side: routes notifications to the peers of the current round.

pub mod connection_manager;

pub use connection_manager::OnDemandConnectionManager;
