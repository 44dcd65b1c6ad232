//! # Batch Verifier Service
//!
//! A cloneable handle feeding an `mpsc` queue, and one dedicated worker
//! task that owns the queue end to end. Each worker tick collects whatever
//! batchable jobs are already waiting (bounded by
//! [`MAX_BATCH_JOBS`]), folds their sets into a single aggregate pairing,
//! and falls back to per-job individual verification when the aggregate
//! fails.

use shared_crypto::{
    verify_signature_sets_aggregate, verify_signature_sets_individually, SignatureSet,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::domain::entities::{VerifyJob, VerifyOptions, MAX_BATCH_JOBS};
use crate::error::VerifierError;
use crate::ports::inbound::SignatureVerificationApi;

/// Factory for the verification worker.
pub struct BatchVerifierService;

impl BatchVerifierService {
    /// Spawn the worker task and return the handle callers verify through.
    ///
    /// The worker lives until every handle clone is dropped.
    pub fn spawn(queue_capacity: usize) -> (BatchVerifierHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(queue_capacity);
        let worker = tokio::spawn(run_worker(rx));
        (BatchVerifierHandle { tx }, worker)
    }
}

/// Cloneable entry point to the verification queue.
#[derive(Clone)]
pub struct BatchVerifierHandle {
    tx: mpsc::Sender<VerifyJob>,
}

impl BatchVerifierHandle {
    /// Queue the caller's sets and await the verdict.
    ///
    /// # Errors
    ///
    /// [`VerifierError::QueueClosed`] when the worker is gone;
    /// [`VerifierError::WorkerGone`] when it dies mid-request.
    pub async fn verify(
        &self,
        sets: Vec<SignatureSet>,
        options: VerifyOptions,
    ) -> Result<bool, VerifierError> {
        let (reply, verdict) = oneshot::channel();
        let job = VerifyJob {
            sets,
            options,
            job_id: Uuid::new_v4(),
            reply,
        };
        trace!(job_id = %job.job_id, batchable = options.batchable, "queueing verification");

        self.tx
            .send(job)
            .await
            .map_err(|_| VerifierError::QueueClosed)?;
        verdict.await.map_err(|_| VerifierError::WorkerGone)
    }
}

#[async_trait::async_trait]
impl SignatureVerificationApi for BatchVerifierHandle {
    async fn verify_signature_sets(
        &self,
        sets: Vec<SignatureSet>,
        options: VerifyOptions,
    ) -> Result<bool, VerifierError> {
        self.verify(sets, options).await
    }
}

// =============================================================================
// Worker
// =============================================================================

async fn run_worker(mut rx: mpsc::Receiver<VerifyJob>) {
    while let Some(first) = rx.recv().await {
        let mut batchable: Vec<VerifyJob> = Vec::new();
        let mut standalone: Vec<VerifyJob> = Vec::new();
        sort_job(first, &mut batchable, &mut standalone);

        // Coalesce whatever is already queued; never wait for more.
        while batchable.len() + standalone.len() < MAX_BATCH_JOBS {
            match rx.try_recv() {
                Ok(job) => sort_job(job, &mut batchable, &mut standalone),
                Err(_) => break,
            }
        }

        for job in standalone {
            let valid = job_is_valid(&job.sets);
            answer(job, valid);
        }
        process_batch(batchable);
    }
    debug!("batch verification worker stopped");
}

/// Route a job to the batch or the standalone lane. Degenerate empty jobs
/// are answered immediately so they can never poison a batch verdict.
fn sort_job(job: VerifyJob, batchable: &mut Vec<VerifyJob>, standalone: &mut Vec<VerifyJob>) {
    if job.sets.is_empty() {
        answer(job, false);
    } else if job.options.batchable {
        batchable.push(job);
    } else {
        standalone.push(job);
    }
}

fn process_batch(jobs: Vec<VerifyJob>) {
    if jobs.len() <= 1 {
        for job in jobs {
            let valid = job_is_valid(&job.sets);
            answer(job, valid);
        }
        return;
    }

    let union: Vec<SignatureSet> = jobs
        .iter()
        .flat_map(|job| job.sets.iter().cloned())
        .collect();
    trace!(jobs = jobs.len(), sets = union.len(), "running aggregate verification");

    if verify_signature_sets_aggregate(&union) {
        for job in jobs {
            answer(job, true);
        }
        return;
    }

    // The aggregate is all-or-nothing; attribute the failure per job so a
    // single invalid signature cannot fail co-batched honest callers.
    debug!(
        jobs = jobs.len(),
        "aggregate verification failed, retrying jobs individually"
    );
    for job in jobs {
        let valid = job_is_valid(&job.sets);
        answer(job, valid);
    }
}

/// A job passes iff every one of its sets verifies.
fn job_is_valid(sets: &[SignatureSet]) -> bool {
    !sets.is_empty() && verify_signature_sets_individually(sets).into_iter().all(|ok| ok)
}

/// Deliver a verdict. A dropped receiver means the caller went away; the
/// result is discarded rather than unwinding the batch.
fn answer(job: VerifyJob, valid: bool) {
    trace!(job_id = %job.job_id, valid, "verification verdict");
    let _ = job.reply.send(valid);
}
