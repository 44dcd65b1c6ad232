//! Gossip validation error types.

use pb_03_batch_verification::VerifierError;
use shared_types::StateAccessError;
use thiserror::Error;

/// Infrastructure failures during a validation run.
///
/// Distinct from [`crate::ValidationOutcome`]: these mean the validator
/// could not reach a verdict at all, so the message is neither penalized
/// nor propagated and may be retried by the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GossipValidationError {
    /// The head-state snapshot could not be read.
    #[error(transparent)]
    State(#[from] StateAccessError),

    /// The signature verification service is unavailable.
    #[error(transparent)]
    Verifier(#[from] VerifierError),
}
