//! # Domain-Separated Signing
//!
//! Signing roots combine an object digest with a domain so a signature can
//! never be replayed across message families or networks. The scheme:
//!
//! ```text
//! fork_data_root = sha256(fork_version || genesis_validators_root)
//! domain         = domain_type || fork_data_root[0..28]
//! signing_root   = sha256(object_root || domain)
//! ```

use crate::bls::{BlsPublicKey, BlsSignature};
use crate::errors::CryptoError;
use crate::hashing::{Hash, Sha256Hasher};

/// Closed catalog of signature domains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomainType {
    /// Block proposals.
    BeaconProposer,
    /// Attestations.
    BeaconAttester,
    /// Voluntary validator exits.
    VoluntaryExit,
    /// Withdrawal-credential rotations.
    BlsToExecutionChange,
}

impl DomainType {
    /// Wire bytes of the domain type.
    pub fn as_bytes(&self) -> [u8; 4] {
        match self {
            DomainType::BeaconProposer => [0x00, 0x00, 0x00, 0x00],
            DomainType::BeaconAttester => [0x01, 0x00, 0x00, 0x00],
            DomainType::VoluntaryExit => [0x04, 0x00, 0x00, 0x00],
            DomainType::BlsToExecutionChange => [0x0A, 0x00, 0x00, 0x00],
        }
    }
}

/// Digest binding a fork version to a network.
pub fn compute_fork_data_root(fork_version: &[u8; 4], genesis_validators_root: &[u8; 32]) -> Hash {
    let mut hasher = Sha256Hasher::new();
    hasher.update(fork_version).update(genesis_validators_root);
    hasher.finalize()
}

/// Full 32-byte signing domain for a message family on a given fork.
pub fn compute_domain(
    domain_type: DomainType,
    fork_version: &[u8; 4],
    genesis_validators_root: &[u8; 32],
) -> [u8; 32] {
    let fork_data_root = compute_fork_data_root(fork_version, genesis_validators_root);

    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(&domain_type.as_bytes());
    domain[4..].copy_from_slice(&fork_data_root[..28]);
    domain
}

/// The digest that actually gets signed: object root mixed with the domain.
pub fn compute_signing_root(object_root: &Hash, domain: &[u8; 32]) -> Hash {
    let mut hasher = Sha256Hasher::new();
    hasher.update(object_root).update(domain);
    hasher.finalize()
}

/// One proof obligation: a signing root, the key(s) that must have signed
/// it, and the signature claimed for it.
///
/// Multi-key sets model aggregate-signed messages; the keys collapse to one
/// effective key before verification.
#[derive(Clone, Debug)]
pub struct SignatureSet {
    /// Domain-separated digest that was signed.
    pub signing_root: Hash,
    /// Claimed signer key(s).
    pub public_keys: Vec<BlsPublicKey>,
    /// Claimed signature.
    pub signature: BlsSignature,
}

impl SignatureSet {
    /// Single-signer convenience constructor.
    pub fn single(signing_root: Hash, public_key: BlsPublicKey, signature: BlsSignature) -> Self {
        Self {
            signing_root,
            public_keys: vec![public_key],
            signature,
        }
    }

    /// Collapse the signer keys into the one key the signature must verify
    /// against.
    ///
    /// # Errors
    ///
    /// `EmptyAggregation` when the set carries no keys.
    pub fn effective_public_key(&self) -> Result<BlsPublicKey, CryptoError> {
        match self.public_keys.as_slice() {
            [] => Err(CryptoError::EmptyAggregation),
            [single] => Ok(single.clone()),
            keys => BlsPublicKey::aggregate(keys),
        }
    }

    /// Verify this set on its own.
    pub fn verify_single(&self) -> bool {
        match self.effective_public_key() {
            Ok(key) => key.verify(&self.signing_root, &self.signature),
            Err(_) => false,
        }
    }
}
