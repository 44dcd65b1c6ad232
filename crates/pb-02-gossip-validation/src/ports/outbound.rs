//! Outbound ports for the gossip validation subsystem.

use std::sync::Arc;

use async_trait::async_trait;
use pb_03_batch_verification::{VerifierError, VerifyOptions};
use shared_crypto::SignatureSet;
use shared_types::{HeadStateView, StateAccessError};

use crate::domain::seen_cache::BlsChangePool;

/// The beacon-chain collaborator validators run against.
///
/// Implementations are expected to serve `head_state` from a cached
/// snapshot; the read may still suspend when the underlying store defines
/// it as asynchronous. `verify_signature_sets` is the pipeline's dominant
/// suspension point and must be awaited without holding any exclusive
/// resource.
#[async_trait]
pub trait ChainContext: Send + Sync {
    /// Current head-state snapshot.
    async fn head_state(&self) -> Result<Arc<HeadStateView>, StateAccessError>;

    /// The seen-pool for the withdrawal-credential-change message class.
    fn bls_change_pool(&self) -> &BlsChangePool;

    /// Proof verification capability, batchable across concurrent callers.
    async fn verify_signature_sets(
        &self,
        sets: Vec<SignatureSet>,
        options: VerifyOptions,
    ) -> Result<bool, VerifierError>;
}
