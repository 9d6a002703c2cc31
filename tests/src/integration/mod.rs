//! # Integration Tests
//!
//! Peers run in one process and talk through `InProcessNetwork`, so every
//! request still goes through the frame codec and the wire server.

#[cfg(test)]
pub mod fixtures;
pub mod ordering_flow;
pub mod topology_flow;
