//! # Shared Types Crate
//!
//! Domain entities shared by the ordering transport, the topology bus, and
//! their collaborators.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Round`, transactions, batches, proposals and
//!   peer assignments are defined once, here.
//! - **Total Peer Mappings**: `PeerCollection<T>` always holds a value for
//!   every `PeerRole`; partial assignments cannot be expressed.

pub mod entities;
pub mod errors;
pub mod topology;

pub use entities::*;
pub use errors::*;
pub use topology::*;
