//! Inbound ports (API) for the gossip validation subsystem.

use async_trait::async_trait;
use shared_types::SignedBlsToExecutionChange;

use crate::domain::outcome::ValidationOutcome;
use crate::error::GossipValidationError;

/// API the gossip router drives for every inbound message of this family.
#[async_trait]
pub trait GossipValidationApi: Send + Sync {
    /// Validate one credential-rotation message and, on ACCEPT, mark its
    /// subject seen.
    ///
    /// # Errors
    ///
    /// [`GossipValidationError`] when the chain collaborator cannot serve
    /// the run; the message then has no verdict at all.
    async fn validate_bls_to_execution_change(
        &self,
        signed: &SignedBlsToExecutionChange,
    ) -> Result<ValidationOutcome, GossipValidationError>;
}
