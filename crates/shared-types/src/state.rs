//! # Head-State View
//!
//! Read-only interface to the external state-transition collaborator. The
//! p2p layer only ever sees an immutable snapshot of the head state plus a
//! handful of pure validity predicates; how the state is computed is not its
//! concern.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::entities::{BlsToExecutionChange, Slot, ValidatorIndex};

/// Withdrawal-credential prefix for validators still on a BLS key.
pub const BLS_WITHDRAWAL_PREFIX: u8 = 0x00;

/// Withdrawal-credential prefix for validators already bound to an
/// execution address.
pub const EXECUTION_ADDRESS_PREFIX: u8 = 0x01;

/// Registry record of a single validator, as visible to the p2p layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validator {
    /// Signing public key (48-byte compressed BLS).
    pub pubkey: [u8; 48],
    /// Withdrawal credentials: prefix byte plus 31 commitment bytes.
    pub withdrawal_credentials: [u8; 32],
}

/// Immutable snapshot of the chain head used by gossip validators.
#[derive(Clone, Debug)]
pub struct HeadStateView {
    /// Slot of the snapshot.
    pub slot: Slot,
    /// Validator registry at the snapshot.
    pub validators: Vec<Validator>,
}

impl HeadStateView {
    /// Look up a validator by index.
    pub fn validator(&self, index: ValidatorIndex) -> Option<&Validator> {
        self.validators.get(index as usize)
    }

    /// Number of validators in the registry.
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }
}

/// Failure reading the head state from the external collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateAccessError {
    /// The state provider could not serve a snapshot.
    #[error("head state unavailable: {0}")]
    Unavailable(String),
}

/// Structural reasons a credential rotation is invalid against a snapshot.
///
/// These map one-to-one onto gossip REJECT codes; signature validity is
/// deliberately not part of this predicate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlsChangeInvalid {
    /// The subject index is outside the registry.
    #[error("validator {index} does not exist in the registry")]
    UnknownValidator { index: ValidatorIndex },

    /// The subject already rotated to an execution address.
    #[error("validator {index} does not have BLS withdrawal credentials")]
    NonBlsWithdrawalCredentials { index: ValidatorIndex },

    /// The claimed BLS key does not hash to the committed credentials.
    #[error("withdrawal credentials of validator {index} do not match the supplied key")]
    WithdrawalCredentialsMismatch { index: ValidatorIndex },
}

/// Pure structural check of a credential rotation against a head snapshot.
///
/// Deterministic for a given snapshot, performs no I/O, and never checks
/// the signature; that is the caller's last, most expensive stage.
///
/// # Errors
///
/// Returns the first [`BlsChangeInvalid`] reason encountered, in subject
/// existence, credential-prefix, credential-commitment order.
pub fn check_bls_to_execution_change(
    state: &HeadStateView,
    change: &BlsToExecutionChange,
) -> Result<(), BlsChangeInvalid> {
    let index = change.validator_index;
    let validator = state
        .validator(index)
        .ok_or(BlsChangeInvalid::UnknownValidator { index })?;

    let credentials = &validator.withdrawal_credentials;
    if credentials[0] != BLS_WITHDRAWAL_PREFIX {
        return Err(BlsChangeInvalid::NonBlsWithdrawalCredentials { index });
    }

    // Credentials commit to sha256(pubkey) with the prefix byte overwritten.
    let digest = Sha256::digest(change.from_bls_pubkey);
    if credentials[1..] != digest[1..] {
        return Err(BlsChangeInvalid::WithdrawalCredentialsMismatch { index });
    }

    Ok(())
}

/// Build the withdrawal credentials committing to a BLS public key.
pub fn bls_withdrawal_credentials(pubkey: &[u8; 48]) -> [u8; 32] {
    let digest = Sha256::digest(pubkey);
    let mut credentials = [0u8; 32];
    credentials.copy_from_slice(&digest);
    credentials[0] = BLS_WITHDRAWAL_PREFIX;
    credentials
}
