//! Ports layer: inbound API consumed by the transport, outbound handler
//! contract supplied by the embedding node.

pub mod inbound;
pub mod outbound;
