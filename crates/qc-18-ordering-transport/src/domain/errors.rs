//! Error types for the Ordering Transport
//!
//! Validation-level errors are absorbed per group or per transaction;
//! construction and protocol errors propagate to whoever triggered them.

use thiserror::Error;

/// Failure to build a notification channel for a peer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The peer identity cannot be used to open a channel.
    #[error("Invalid peer {peer}: {reason}")]
    InvalidPeer { peer: String, reason: String },

    /// Channel setup failed for a valid peer.
    #[error("Channel setup for {peer} failed: {reason}")]
    ChannelSetup { peer: String, reason: String },
}

/// Wire-level failures reported to the immediate caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Bytes could not be decoded into a message.
    #[error("Failed to decode message: {0}")]
    Decode(String),

    /// A message could not be encoded.
    #[error("Failed to encode message: {0}")]
    Encode(String),

    /// Frame exceeds the configured size cap.
    #[error("Frame too large: {size} > {max}")]
    FrameTooLarge { size: usize, max: usize },

    /// Proposal request without a round.
    #[error("Proposal request carries no round")]
    MissingRound,

    /// Batch submission exceeds the per-request transaction cap.
    #[error("Request too large: {count} transactions > {max}")]
    RequestTooLarge { count: usize, max: usize },

    /// The peer answered with a message of the wrong kind.
    #[error("Unexpected message: expected {expected}")]
    UnexpectedMessage { expected: &'static str },
}

/// Wire → domain field conversion failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Invalid {field} length: expected 32 bytes, got {len}")]
    InvalidHashLength { field: &'static str, len: usize },

    #[error("Invalid public key length: expected 32 bytes, got {len}")]
    InvalidPublicKeyLength { len: usize },

    #[error("Unknown batch type: {0}")]
    UnknownBatchType(u32),
}

/// Stateless transaction validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionValidationError {
    #[error("Creator account id is empty")]
    EmptyCreator,

    #[error("Quorum must be at least 1")]
    ZeroQuorum,

    #[error("Signature {index} is empty")]
    EmptySignature { index: usize },
}

/// Failures of the byte transport beneath a notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No route to the peer.
    #[error("Peer unreachable: {0}")]
    Unreachable(String),

    /// The round trip exceeded its bound.
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// The remote side failed to handle the request.
    #[error("Remote error: {0}")]
    Remote(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Invalid transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Proposal request timeout must be non-zero")]
    ZeroRequestTimeout,

    #[error("Proposal request timeout {timeout_ms}ms must exceed proposal wait {wait_ms}ms")]
    RequestTimeoutTooShort { timeout_ms: u64, wait_ms: u64 },

    #[error("{0} must be non-zero")]
    ZeroLimit(&'static str),
}
