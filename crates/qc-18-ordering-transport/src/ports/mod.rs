//! Ports module for the Ordering Transport
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::OdOsNotification;
pub use outbound::{
    OdOsNotificationFactory, OnDemandOrderingService, PeerTransport, TransactionBatchFactory,
    TransactionValidator,
};
