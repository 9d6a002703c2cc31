//! Wire layer for the Ordering Transport
//!
//! Payloads exchanged between peers, the frame codec and the server that
//! answers inbound requests.

pub mod codec;
pub mod payloads;
pub mod server;

pub use payloads::{
    Ack, BatchesRequest, OdOsRequest, OdOsResponse, ProposalRequest, ProposalResponse,
    WireProposal, WireRound, WireTransaction,
};
pub use server::OnDemandOsServer;
