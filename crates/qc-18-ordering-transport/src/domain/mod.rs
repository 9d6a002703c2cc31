//! Domain module for the Ordering Transport
//!
//! Contains the batch collection type, candidate parsing and error types.

pub mod batch_parser;
pub mod entities;
pub mod errors;

pub use batch_parser::parse_batches;
pub use entities::*;
pub use errors::*;
