//! # Verification Job Model

use shared_crypto::SignatureSet;
use tokio::sync::oneshot;
use uuid::Uuid;

/// Most jobs coalesced into one aggregate operation per tick. Bounds the
/// blast radius of an aggregate failure and keeps fallback latency flat.
pub const MAX_BATCH_JOBS: usize = 64;

/// Caller-chosen verification options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Whether this request may be coalesced with concurrent requests into
    /// one aggregate cryptographic operation.
    pub batchable: bool,
}

impl VerifyOptions {
    /// The common gossip-validator configuration.
    pub fn batchable() -> Self {
        Self { batchable: true }
    }

    /// Force standalone verification.
    pub fn individual() -> Self {
        Self { batchable: false }
    }
}

/// One queued verification request. Transient: created per validation
/// call, answered once, never persisted.
pub(crate) struct VerifyJob {
    /// The proof obligations of this caller; the caller's result is the
    /// conjunction over all of them.
    pub sets: Vec<SignatureSet>,
    /// Coalescing preference.
    pub options: VerifyOptions,
    /// Correlation id for tracing.
    pub job_id: Uuid,
    /// Reply channel; a dropped receiver simply discards the result.
    pub reply: oneshot::Sender<bool>,
}
