//! Ports layer: the verification capability consumed by gossip validators.

pub mod inbound;
