//! Cross-subsystem integration scenarios.

pub mod batch_verifier;
pub mod gossip_bls_change;
pub mod reqresp_rate_limits;
