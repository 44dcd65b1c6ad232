//! # Gossip Validation Service
//!
//! Application service implementing [`GossipValidationApi`]: runs the
//! pipeline for each message family and performs the post-accept
//! bookkeeping (marking the subject seen) the pipeline itself leaves to
//! its caller.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{ChainConfig, SignedBlsToExecutionChange};
use tracing::debug;

use crate::domain::outcome::ValidationOutcome;
use crate::error::GossipValidationError;
use crate::pipeline;
use crate::ports::inbound::GossipValidationApi;
use crate::ports::outbound::ChainContext;

/// Validation service over a chain collaborator.
pub struct GossipValidationService<C: ChainContext> {
    chain: Arc<C>,
    config: Arc<ChainConfig>,
}

impl<C: ChainContext> GossipValidationService<C> {
    /// Service over `chain` with the frozen `config`.
    pub fn new(chain: Arc<C>, config: Arc<ChainConfig>) -> Self {
        Self { chain, config }
    }
}

#[async_trait]
impl<C: ChainContext + 'static> GossipValidationApi for GossipValidationService<C> {
    async fn validate_bls_to_execution_change(
        &self,
        signed: &SignedBlsToExecutionChange,
    ) -> Result<ValidationOutcome, GossipValidationError> {
        let index = signed.message.validator_index;
        let outcome =
            pipeline::bls_to_execution_change::validate_bls_to_execution_change(
                &*self.chain,
                &self.config,
                signed,
            )
            .await?;

        if outcome.is_accept() {
            // Marking is keyed to the snapshot epoch so the owning pool can
            // prune on chain progress. Under the accepted dedup race the
            // first completed acceptance wins; later marks are no-ops.
            let head = self.chain.head_state().await?;
            let epoch = self.config.epoch_at_slot(head.slot);
            let newly_marked = self.chain.bls_change_pool().mark_seen(index, epoch);
            debug!(index, epoch, newly_marked, "credential change accepted");
        } else {
            debug!(index, ?outcome, "credential change not accepted");
        }

        Ok(outcome)
    }
}
