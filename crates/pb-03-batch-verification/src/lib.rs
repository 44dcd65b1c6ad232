//! # Batch Verification Subsystem (pb-03)
//!
//! Asynchronous BLS signature verification with transparent batching. The
//! dominant suspension point of the gossip pipeline lives here: every
//! validator awaits this subsystem for its final, most expensive stage.
//!
//! ## Architecture
//!
//! An explicit batch-collection queue, not shared mutable verifier state:
//! callers clone a [`BatchVerifierHandle`] and await [`verify`]; a single
//! dedicated worker task owns the queue, drains whatever batchable jobs are
//! waiting each tick, and runs one aggregate pairing over the union. When
//! the aggregate fails, affected jobs are re-verified individually so one
//! invalid signature can never fail a co-batched honest caller.
//!
//! [`verify`]: BatchVerifierHandle::verify

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::entities::{VerifyOptions, MAX_BATCH_JOBS};
pub use error::VerifierError;
pub use ports::inbound::SignatureVerificationApi;
pub use service::{BatchVerifierHandle, BatchVerifierService};
