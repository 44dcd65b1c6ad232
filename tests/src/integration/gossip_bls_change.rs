//! End-to-end gossip validation over the real batch verification worker.

#[cfg(test)]
mod tests {
    use crate::support::{
        bls_validator, execution_validator, signed_change, test_config, TestChain,
    };
    use pb_02_gossip_validation::{
        GossipValidationApi, GossipValidationService, IgnoreCode, RejectCode, ValidationOutcome,
    };
    use shared_crypto::BlsKeyPair;
    use shared_types::HeadStateView;

    /// The canonical walk through every verdict the family can produce:
    /// subject 0 holds a BLS credential, subject 1 already rotated, and
    /// subject 2 does not exist.
    #[tokio::test]
    async fn test_full_validation_scenario() {
        crate::support::init_tracing();
        let config = test_config();
        let key0 = BlsKeyPair::generate();
        let key1 = BlsKeyPair::generate();
        let head = HeadStateView {
            slot: 50,
            validators: vec![bls_validator(&key0), execution_validator()],
        };

        let change0 = signed_change(&config, &head, &key0, 0);
        let change1 = signed_change(&config, &head, &key1, 1);
        let change2 = signed_change(&config, &head, &key0, 2);
        let mut tampered = change0.clone();
        tampered.signature[20] ^= 0x04;

        let chain = TestChain::spawn(head);
        let service = GossipValidationService::new(chain.clone(), config);

        // Subject 1 already rotated: structurally invalid, no crypto done.
        assert_eq!(
            service.validate_bls_to_execution_change(&change1).await.unwrap(),
            ValidationOutcome::Reject(RejectCode::NonBlsWithdrawalCredentials { index: 1 })
        );
        // Subject 2 beyond the registry: structurally invalid.
        assert_eq!(
            service.validate_bls_to_execution_change(&change2).await.unwrap(),
            ValidationOutcome::Reject(RejectCode::UnknownValidator { index: 2 })
        );
        assert_eq!(chain.verifier_calls(), 0);

        // Tampered proof for subject 0: reaches and fails the signature
        // stage, with no mark left behind.
        assert_eq!(
            service.validate_bls_to_execution_change(&tampered).await.unwrap(),
            ValidationOutcome::Reject(RejectCode::InvalidSignature)
        );
        assert!(!chain.pool().has_seen(&0));

        // The genuine message is accepted and marked.
        assert_eq!(
            service.validate_bls_to_execution_change(&change0).await.unwrap(),
            ValidationOutcome::Accept
        );
        assert!(chain.pool().has_seen(&0));

        // Resubmitting the identical message: duplicate, zero further
        // verifier calls.
        let calls_before = chain.verifier_calls();
        assert_eq!(
            service.validate_bls_to_execution_change(&change0).await.unwrap(),
            ValidationOutcome::Ignore(IgnoreCode::AlreadySeen)
        );
        assert_eq!(chain.verifier_calls(), calls_before);
    }

    /// Exactly one mark per accepted subject, and rejects never mark.
    #[tokio::test]
    async fn test_accept_marks_exactly_once() {
        let config = test_config();
        let key0 = BlsKeyPair::generate();
        let head = HeadStateView {
            slot: 50,
            validators: vec![bls_validator(&key0)],
        };
        let change = signed_change(&config, &head, &key0, 0);

        let chain = TestChain::spawn(head);
        let service = GossipValidationService::new(chain.clone(), config);

        service.validate_bls_to_execution_change(&change).await.unwrap();
        assert_eq!(chain.pool().len(), 1);

        for _ in 0..3 {
            service.validate_bls_to_execution_change(&change).await.unwrap();
        }
        assert_eq!(chain.pool().len(), 1);
    }

    /// Concurrent validations of distinct subjects share the verification
    /// worker; each still gets its own correct verdict.
    #[tokio::test]
    async fn test_concurrent_subjects_validate_independently() {
        let config = test_config();
        let keys: Vec<BlsKeyPair> = (0..4).map(|_| BlsKeyPair::generate()).collect();
        let head = HeadStateView {
            slot: 50,
            validators: keys.iter().map(bls_validator).collect(),
        };
        let changes: Vec<_> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| signed_change(&config, &head, key, i as u64))
            .collect();
        let mut bad = changes[3].clone();
        bad.signature[1] ^= 0x80;

        let chain = TestChain::spawn(head);
        let service = std::sync::Arc::new(GossipValidationService::new(chain.clone(), config));

        let mut tasks = Vec::new();
        for change in changes.iter().take(3).cloned() {
            let service = service.clone();
            tasks.push(tokio::spawn(async move {
                service.validate_bls_to_execution_change(&change).await.unwrap()
            }));
        }
        let bad_task = {
            let service = service.clone();
            tokio::spawn(async move {
                service.validate_bls_to_execution_change(&bad).await.unwrap()
            })
        };

        for task in tasks {
            assert_eq!(task.await.unwrap(), ValidationOutcome::Accept);
        }
        assert_eq!(
            bad_task.await.unwrap(),
            ValidationOutcome::Reject(RejectCode::InvalidSignature)
        );
    }

    /// Epoch-horizon pruning re-opens a subject for later changes.
    #[tokio::test]
    async fn test_pool_pruning_reopens_subject() {
        let config = test_config();
        let key0 = BlsKeyPair::generate();
        let head = HeadStateView {
            slot: 50,
            validators: vec![bls_validator(&key0)],
        };
        let change = signed_change(&config, &head, &key0, 0);

        let chain = TestChain::spawn(head);
        let service = GossipValidationService::new(chain.clone(), config);

        service.validate_bls_to_execution_change(&change).await.unwrap();
        assert_eq!(
            service.validate_bls_to_execution_change(&change).await.unwrap(),
            ValidationOutcome::Ignore(IgnoreCode::AlreadySeen)
        );

        // The owning pool prunes past the marking epoch (slot 50 → epoch 6).
        chain.pool().prune_up_to(7);
        assert_eq!(
            service.validate_bls_to_execution_change(&change).await.unwrap(),
            ValidationOutcome::Accept
        );
    }
}
