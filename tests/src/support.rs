//! Shared fixtures for the integration suite.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pb_02_gossip_validation::{BlsChangePool, ChainContext};
use pb_03_batch_verification::{
    BatchVerifierHandle, BatchVerifierService, VerifierError, VerifyOptions,
};
use shared_crypto::{compute_domain, compute_signing_root, BlsKeyPair, DomainType, SignatureSet};
use shared_types::{
    bls_withdrawal_credentials, BlsToExecutionChange, ChainConfig, ForkName, HeadStateView,
    SignedBlsToExecutionChange, StateAccessError, Validator, EXECUTION_ADDRESS_PREFIX,
};

/// Install a log subscriber for a test run; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// The network preset every integration scenario runs on: 8-slot epochs and
/// the full fork schedule.
pub fn test_config() -> Arc<ChainConfig> {
    Arc::new(
        ChainConfig::builder()
            .slots_per_epoch(8)
            .genesis_validators_root([0x4b; 32])
            .fork(ForkName::Phase0, [0, 0, 0, 0], 0)
            .fork(ForkName::Altair, [1, 0, 0, 0], 2)
            .fork(ForkName::Bellatrix, [2, 0, 0, 0], 4)
            .fork(ForkName::Capella, [3, 0, 0, 0], 6)
            .build()
            .expect("valid test schedule"),
    )
}

/// A registry validator still on a BLS withdrawal key.
pub fn bls_validator(withdrawal_key: &BlsKeyPair) -> Validator {
    Validator {
        pubkey: [0x01; 48],
        withdrawal_credentials: bls_withdrawal_credentials(
            &withdrawal_key.public_key().to_bytes(),
        ),
    }
}

/// A registry validator already rotated to an execution address.
pub fn execution_validator() -> Validator {
    let mut credentials = [0u8; 32];
    credentials[0] = EXECUTION_ADDRESS_PREFIX;
    credentials[12..].copy_from_slice(&[0xAA; 20]);
    Validator {
        pubkey: [0x02; 48],
        withdrawal_credentials: credentials,
    }
}

/// Build a correctly signed credential rotation for `index` under the fork
/// active at `head.slot`.
pub fn signed_change(
    config: &ChainConfig,
    head: &HeadStateView,
    withdrawal_key: &BlsKeyPair,
    index: u64,
) -> SignedBlsToExecutionChange {
    let message = BlsToExecutionChange {
        validator_index: index,
        from_bls_pubkey: withdrawal_key.public_key().to_bytes(),
        to_execution_address: [0xEE; 20],
    };
    let fork = config.fork_at_epoch(config.epoch_at_slot(head.slot));
    let domain = compute_domain(
        DomainType::BlsToExecutionChange,
        &fork.version,
        &config.genesis_validators_root(),
    );
    let signing_root = compute_signing_root(&message.tree_root(), &domain);
    SignedBlsToExecutionChange {
        signature: withdrawal_key.sign(&signing_root).to_bytes(),
        message,
    }
}

/// Chain collaborator wired to the real batch verification worker, with a
/// call counter so tests can observe the dedup cost-ordering property.
pub struct TestChain {
    head: Arc<HeadStateView>,
    pool: BlsChangePool,
    verifier: BatchVerifierHandle,
    verifier_calls: AtomicUsize,
}

impl TestChain {
    /// Spawn a verification worker and wrap it with `head`.
    pub fn spawn(head: HeadStateView) -> Arc<Self> {
        let (verifier, _worker) = BatchVerifierService::spawn(64);
        Arc::new(Self {
            head: Arc::new(head),
            pool: BlsChangePool::new(),
            verifier,
            verifier_calls: AtomicUsize::new(0),
        })
    }

    /// Number of times a validator reached the signature stage.
    pub fn verifier_calls(&self) -> usize {
        self.verifier_calls.load(Ordering::SeqCst)
    }

    /// Direct pool access for assertions.
    pub fn pool(&self) -> &BlsChangePool {
        &self.pool
    }
}

#[async_trait]
impl ChainContext for TestChain {
    async fn head_state(&self) -> Result<Arc<HeadStateView>, StateAccessError> {
        Ok(self.head.clone())
    }

    fn bls_change_pool(&self) -> &BlsChangePool {
        &self.pool
    }

    async fn verify_signature_sets(
        &self,
        sets: Vec<SignatureSet>,
        options: VerifyOptions,
    ) -> Result<bool, VerifierError> {
        self.verifier_calls.fetch_add(1, Ordering::SeqCst);
        self.verifier.verify(sets, options).await
    }
}
