//! # Withdrawal-Credential-Change Validation
//!
//! The representative gossip validator family. Stages, strictly in order:
//!
//! 1. **Dedup**: subject already seen ⇒ `Ignore(AlreadySeen)`, zero
//!    cryptographic work.
//! 2. **Structural**: pure predicates against the head snapshot with
//!    signature checking disabled ⇒ `Reject(<structural code>)`.
//! 3. **Signature**: domain-separated signing root under the
//!    epoch-appropriate fork version, verified batchable ⇒
//!    `Reject(InvalidSignature)`.
//! 4. **Accept**: the caller marks the subject seen and propagates.

use pb_03_batch_verification::VerifyOptions;
use shared_crypto::{
    compute_domain, compute_signing_root, BlsPublicKey, BlsSignature, CryptoError, DomainType,
    SignatureSet,
};
use shared_types::{
    check_bls_to_execution_change, ChainConfig, HeadStateView, SignedBlsToExecutionChange,
};
use tracing::trace;

use crate::domain::outcome::{IgnoreCode, RejectCode, ValidationOutcome};
use crate::error::GossipValidationError;
use crate::ports::outbound::ChainContext;

/// Build the proof obligation of a credential-rotation message.
///
/// The signing domain uses the fork version active at the snapshot's
/// epoch, so a signature can never be replayed onto another fork or
/// network.
///
/// # Errors
///
/// [`CryptoError`] when the embedded key or signature bytes do not parse
/// as curve points.
pub fn change_signature_set(
    config: &ChainConfig,
    head: &HeadStateView,
    signed: &SignedBlsToExecutionChange,
) -> Result<SignatureSet, CryptoError> {
    let epoch = config.epoch_at_slot(head.slot);
    let fork = config.fork_at_epoch(epoch);
    let domain = compute_domain(
        DomainType::BlsToExecutionChange,
        &fork.version,
        &config.genesis_validators_root(),
    );
    let signing_root = compute_signing_root(&signed.message.tree_root(), &domain);

    let public_key = BlsPublicKey::from_bytes(&signed.message.from_bls_pubkey)?;
    let signature = BlsSignature::from_bytes(&signed.signature)?;
    Ok(SignatureSet::single(signing_root, public_key, signature))
}

/// Run the full pipeline for one message. Does not mark the subject seen;
/// that is the accepting caller's responsibility.
///
/// # Errors
///
/// Only infrastructure failures; every verdict about the message itself is
/// a [`ValidationOutcome`].
pub async fn validate_bls_to_execution_change<C: ChainContext + ?Sized>(
    chain: &C,
    config: &ChainConfig,
    signed: &SignedBlsToExecutionChange,
) -> Result<ValidationOutcome, GossipValidationError> {
    let index = signed.message.validator_index;

    // Stage 1: dedup. No suspension, no crypto.
    if chain.bls_change_pool().has_seen(&index) {
        trace!(index, "duplicate credential change ignored");
        return Ok(ValidationOutcome::Ignore(IgnoreCode::AlreadySeen));
    }

    // Stage 2: structural checks, signature checking disabled.
    let head = chain.head_state().await?;
    if let Err(invalid) = check_bls_to_execution_change(&head, &signed.message) {
        trace!(index, %invalid, "credential change rejected structurally");
        return Ok(ValidationOutcome::Reject(invalid.into()));
    }

    // Stage 3: signature, always last. Unparseable key or signature bytes
    // cannot verify, so they fall under the same reject code.
    let set = match change_signature_set(config, &head, signed) {
        Ok(set) => set,
        Err(_) => return Ok(ValidationOutcome::Reject(RejectCode::InvalidSignature)),
    };
    let verified = chain
        .verify_signature_sets(vec![set], VerifyOptions::batchable())
        .await?;
    if !verified {
        return Ok(ValidationOutcome::Reject(RejectCode::InvalidSignature));
    }

    Ok(ValidationOutcome::Accept)
}
