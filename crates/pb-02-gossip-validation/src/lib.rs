//! # Gossip Validation Subsystem (pb-02)
//!
//! Per-message-family validators that gate every inbound gossip message
//! before it may affect local state or be propagated further. Each
//! validator runs the same strictly sequential, short-circuiting pipeline:
//!
//! ```text
//! RECEIVED → dedup → structural checks → signature → ACCEPT | IGNORE | REJECT
//! ```
//!
//! Dedup is always cheapest-first; signature verification is always last
//! and always awaited. IGNORE means currently non-actionable (no peer
//! penalty); REJECT means invalid (peer penalty applies) and is always
//! attributable to one enumerable reason code.
//!
//! The withdrawal-credential-change family implemented here is the
//! structural template for every other gossip family.

pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod service;

pub use domain::outcome::{IgnoreCode, RejectCode, ValidationOutcome};
pub use domain::seen_cache::{BlsChangePool, SeenCache};
pub use error::GossipValidationError;
pub use pipeline::bls_to_execution_change::validate_bls_to_execution_change;
pub use ports::inbound::GossipValidationApi;
pub use ports::outbound::ChainContext;
pub use service::GossipValidationService;
