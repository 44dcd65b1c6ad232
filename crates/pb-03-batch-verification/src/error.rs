//! Batch verifier error types.

use thiserror::Error;

/// Infrastructure failures of the verification service.
///
/// A cryptographically false signature is a `false` result, never an
/// error; these variants only cover the worker/channel machinery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifierError {
    /// The worker's queue is closed; the service was shut down.
    #[error("verification queue closed")]
    QueueClosed,

    /// The worker dropped the reply channel without answering.
    #[error("verification worker dropped the request")]
    WorkerGone,
}
