//! # Validation Outcomes
//!
//! The tagged verdict every gossip validator produces exactly once per
//! message. The IGNORE/REJECT distinction is load-bearing: peer scoring
//! penalizes REJECT only, so validators are forbidden from collapsing the
//! two into a generic failure.

use shared_types::{BlsChangeInvalid, ValidatorIndex};
use thiserror::Error;

/// Reasons a message is currently non-actionable. Never implies the
/// message was malformed; no peer penalty attaches.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IgnoreCode {
    /// An equivalent message was already accepted for this subject.
    #[error("an equivalent message was already seen for this subject")]
    AlreadySeen,
}

/// Reasons a message is invalid. Peer penalty applies; every variant is a
/// stable code peer-scoring can switch on.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RejectCode {
    /// Subject index beyond the registry.
    #[error("validator {index} does not exist")]
    UnknownValidator { index: ValidatorIndex },

    /// Subject is not eligible: already rotated to an execution address.
    #[error("validator {index} does not have BLS withdrawal credentials")]
    NonBlsWithdrawalCredentials { index: ValidatorIndex },

    /// Claimed key does not match the committed credentials.
    #[error("withdrawal credentials of validator {index} do not match the supplied key")]
    WithdrawalCredentialsMismatch { index: ValidatorIndex },

    /// The proof signature does not verify.
    #[error("invalid signature")]
    InvalidSignature,
}

impl From<BlsChangeInvalid> for RejectCode {
    fn from(invalid: BlsChangeInvalid) -> Self {
        match invalid {
            BlsChangeInvalid::UnknownValidator { index } => RejectCode::UnknownValidator { index },
            BlsChangeInvalid::NonBlsWithdrawalCredentials { index } => {
                RejectCode::NonBlsWithdrawalCredentials { index }
            }
            BlsChangeInvalid::WithdrawalCredentialsMismatch { index } => {
                RejectCode::WithdrawalCredentialsMismatch { index }
            }
        }
    }
}

/// Verdict of one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Propagate and apply.
    Accept,
    /// Drop silently; no penalty.
    Ignore(IgnoreCode),
    /// Drop and penalize the sending peer.
    Reject(RejectCode),
}

impl ValidationOutcome {
    /// Whether the message should be propagated and applied.
    pub fn is_accept(&self) -> bool {
        matches!(self, ValidationOutcome::Accept)
    }
}
