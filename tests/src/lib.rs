//! # Pulsar-Beacon Test Suite
//!
//! Unified test crate for cross-subsystem choreography:
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Shared fixtures (chain context, configs, keys)
//! └── integration/      # Cross-subsystem scenarios
//!     ├── reqresp_rate_limits.rs
//!     ├── gossip_bls_change.rs
//!     └── batch_verifier.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pb-tests
//! cargo test -p pb-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
pub mod support;
