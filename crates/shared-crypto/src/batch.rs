//! # Batch Verification Math
//!
//! Pure CPU-bound verification over collections of [`SignatureSet`]s. The
//! asynchronous queueing that feeds these functions lives in the batch
//! verification subsystem; this module only knows how to check.
//!
//! The aggregate path folds every set's signature into one aggregate and
//! runs a single multi-pairing against the per-set signing roots and
//! effective keys. It is all-or-nothing: a single bad set fails the whole
//! aggregate, and the caller falls back to [`verify_signature_sets_individually`]
//! to attribute the failure.

use rayon::prelude::*;

use crate::bls::{BlsPublicKey, BlsSignature};
use crate::signing::SignatureSet;

/// Verify a collection of sets with one aggregate pairing.
///
/// Returns `true` only when every set in the batch is valid. An empty batch
/// is `false`; a singleton degenerates to ordinary verification.
pub fn verify_signature_sets_aggregate(sets: &[SignatureSet]) -> bool {
    match sets {
        [] => false,
        [single] => single.verify_single(),
        _ => {
            let mut keys: Vec<BlsPublicKey> = Vec::with_capacity(sets.len());
            for set in sets {
                match set.effective_public_key() {
                    Ok(key) => keys.push(key),
                    Err(_) => return false,
                }
            }

            let signatures: Vec<BlsSignature> =
                sets.iter().map(|set| set.signature.clone()).collect();
            let aggregate = match BlsSignature::aggregate(&signatures) {
                Ok(aggregate) => aggregate,
                Err(_) => return false,
            };

            let messages: Vec<&[u8]> = sets.iter().map(|set| set.signing_root.as_slice()).collect();
            aggregate.aggregate_verify(&messages, &keys)
        }
    }
}

/// Verify each set on its own, in parallel.
///
/// The attribution path: used after an aggregate failure so one invalid
/// signature cannot take down unrelated co-batched sets.
pub fn verify_signature_sets_individually(sets: &[SignatureSet]) -> Vec<bool> {
    sets.par_iter().map(SignatureSet::verify_single).collect()
}
