//! # Ordering Transport Test Suite
//!
//! Unified test crate for flows that span several crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate flows
//!     ├── ordering_flow.rs   # Manager → wire → server → ordering core
//!     └── topology_flow.rs   # Topology bus → manager rebuilds
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::
//! ```

pub mod integration;
