//! Ports layer: the chain collaborator consumed by validators and the API
//! offered to the gossip router.

pub mod inbound;
pub mod outbound;
