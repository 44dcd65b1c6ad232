//! # Shared Crypto Crate
//!
//! BLS12-381 signature primitives and the domain-separation scheme used by
//! every proof check in the p2p layer.
//!
//! The crate is self-contained: it owns its 32-byte `Hash` alias and takes
//! fork-identifying inputs as plain byte arrays so it can sit below
//! `shared-types` in the dependency order.

pub mod batch;
pub mod bls;
pub mod errors;
pub mod hashing;
pub mod signing;

pub use batch::{verify_signature_sets_aggregate, verify_signature_sets_individually};
pub use bls::{BlsKeyPair, BlsPublicKey, BlsSecretKey, BlsSignature};
pub use errors::CryptoError;
pub use hashing::{sha256, Hash};
pub use signing::{
    compute_domain, compute_fork_data_root, compute_signing_root, DomainType, SignatureSet,
};
