//! Inbound port (API) for the batch verification subsystem.

use async_trait::async_trait;
use shared_crypto::SignatureSet;

use crate::domain::entities::VerifyOptions;
use crate::error::VerifierError;

/// The verification capability handed to gossip validators and any other
/// consumer of proof checks.
///
/// Callers must await this without holding any other exclusive resource;
/// it is the designated suspension point of the validation pipeline.
#[async_trait]
pub trait SignatureVerificationApi: Send + Sync {
    /// Verify a caller's signature sets as one unit.
    ///
    /// Returns `true` iff every set is valid. Coalescing with concurrent
    /// callers is an internal optimization and never changes the answer
    /// for this caller.
    ///
    /// # Errors
    ///
    /// Only infrastructure failures ([`VerifierError`]); invalid
    /// signatures are a `false`, not an error.
    async fn verify_signature_sets(
        &self,
        sets: Vec<SignatureSet>,
        options: VerifyOptions,
    ) -> Result<bool, VerifierError>;
}
