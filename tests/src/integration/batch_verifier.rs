//! Batch verification under concurrent load.

#[cfg(test)]
mod tests {
    use pb_03_batch_verification::{BatchVerifierService, SignatureVerificationApi, VerifyOptions};
    use shared_crypto::{BlsKeyPair, BlsSignature, SignatureSet};

    fn valid_set(tag: u8) -> SignatureSet {
        let keypair = BlsKeyPair::generate();
        let signing_root = [tag; 32];
        SignatureSet::single(
            signing_root,
            keypair.public_key(),
            keypair.sign(&signing_root),
        )
    }

    fn flipped_bit(set: &SignatureSet) -> SignatureSet {
        let mut bytes = set.signature.to_bytes();
        bytes[30] ^= 0x02;
        SignatureSet {
            signing_root: set.signing_root,
            public_keys: set.public_keys.clone(),
            signature: BlsSignature::from_bytes(&bytes)
                .unwrap_or_else(|_| BlsKeyPair::generate().sign(b"off-curve fallback")),
        }
    }

    /// N unrelated valid requests co-batched with one corrupted request:
    /// the corrupted one gets `false`, every other verdict is unaffected
    /// by batch composition.
    #[tokio::test(flavor = "multi_thread")]
    async fn test_one_bad_request_cannot_poison_cobatched_peers() {
        let (handle, _worker) = BatchVerifierService::spawn(128);

        let honest: Vec<_> = (0..8)
            .map(|i| {
                let handle = handle.clone();
                tokio::spawn(async move {
                    let set = valid_set(i as u8 + 1);
                    handle
                        .verify_signature_sets(vec![set], VerifyOptions::batchable())
                        .await
                        .unwrap()
                })
            })
            .collect();

        let corrupted = {
            let handle = handle.clone();
            tokio::spawn(async move {
                let set = flipped_bit(&valid_set(99));
                handle
                    .verify_signature_sets(vec![set], VerifyOptions::batchable())
                    .await
                    .unwrap()
            })
        };

        for task in honest {
            assert!(task.await.unwrap(), "valid request failed in a mixed batch");
        }
        assert!(!corrupted.await.unwrap(), "corrupted request passed");
    }

    /// Repeated mixed workloads: verdicts stay deterministic across many
    /// scheduling interleavings of the same jobs.
    #[tokio::test(flavor = "multi_thread")]
    async fn test_verdicts_stable_across_interleavings() {
        let (handle, _worker) = BatchVerifierService::spawn(128);

        for round in 0..5 {
            let good = {
                let handle = handle.clone();
                tokio::spawn(async move {
                    handle
                        .verify_signature_sets(
                            vec![valid_set(round as u8 + 1)],
                            VerifyOptions::batchable(),
                        )
                        .await
                        .unwrap()
                })
            };
            let bad = {
                let handle = handle.clone();
                tokio::spawn(async move {
                    handle
                        .verify_signature_sets(
                            vec![flipped_bit(&valid_set(round as u8 + 1))],
                            VerifyOptions::batchable(),
                        )
                        .await
                        .unwrap()
                })
            };
            let unbatchable = {
                let handle = handle.clone();
                tokio::spawn(async move {
                    handle
                        .verify_signature_sets(
                            vec![valid_set(round as u8 + 101)],
                            VerifyOptions::individual(),
                        )
                        .await
                        .unwrap()
                })
            };

            assert!(good.await.unwrap());
            assert!(!bad.await.unwrap());
            assert!(unbatchable.await.unwrap());
        }
    }

    /// A multi-key aggregate-signed set verifies through the same queue.
    #[tokio::test]
    async fn test_aggregate_signed_set() {
        let (handle, _worker) = BatchVerifierService::spawn(16);

        let signers: Vec<BlsKeyPair> = (0..3).map(|_| BlsKeyPair::generate()).collect();
        let signing_root = [0x42; 32];
        let signature = BlsSignature::aggregate(
            &signers
                .iter()
                .map(|kp| kp.sign(&signing_root))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let set = SignatureSet {
            signing_root,
            public_keys: signers.iter().map(|kp| kp.public_key()).collect(),
            signature,
        };

        let verdict = handle
            .verify_signature_sets(vec![set], VerifyOptions::batchable())
            .await
            .unwrap();
        assert!(verdict);
    }
}
