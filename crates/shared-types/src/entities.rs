//! # Domain Entities
//!
//! Core data structures shared across the p2p subsystems: consensus
//! primitives, gossip message payloads, and reqresp message payloads.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};

/// 256-bit digest (block roots, state roots, signing roots).
pub type Root = [u8; 32];

/// Slot number since genesis.
pub type Slot = u64;

/// Epoch number since genesis.
pub type Epoch = u64;

/// Position of a validator in the registry.
pub type ValidatorIndex = u64;

/// Network identity of a remote peer.
pub type PeerId = [u8; 32];

/// Fork version selecting a schema epoch of the consensus protocol.
pub type ForkVersion = [u8; 4];

/// Short digest identifying a fork on the wire.
pub type ForkDigest = [u8; 4];

/// Domain-separation value mixed into signing roots.
pub type SigningDomain = [u8; 32];

/// Execution-layer withdrawal address.
pub type ExecutionAddress = [u8; 20];

/// Named protocol version epochs, in activation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ForkName {
    /// Launch schema.
    Phase0,
    /// Sync-committee schema.
    Altair,
    /// Execution-merge schema.
    Bellatrix,
    /// Withdrawals schema.
    Capella,
}

impl ForkName {
    /// Stable lowercase identifier, used in logs and wire metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForkName::Phase0 => "phase0",
            ForkName::Altair => "altair",
            ForkName::Bellatrix => "bellatrix",
            ForkName::Capella => "capella",
        }
    }
}

impl std::fmt::Display for ForkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Gossip Entities
// =============================================================================

/// Request to rotate a validator's withdrawal credential from a BLS key to
/// an execution-layer address.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsToExecutionChange {
    /// Subject validator.
    pub validator_index: ValidatorIndex,
    /// Withdrawal BLS public key currently committed in the credentials.
    #[serde_as(as = "Bytes")]
    pub from_bls_pubkey: [u8; 48],
    /// Execution address taking over withdrawals.
    pub to_execution_address: ExecutionAddress,
}

impl BlsToExecutionChange {
    /// Digest of the message fields, the object root that gets
    /// domain-separated before signing.
    pub fn tree_root(&self) -> Root {
        let mut hasher = Sha256::new();
        hasher.update(self.validator_index.to_le_bytes());
        hasher.update(self.from_bls_pubkey);
        hasher.update(self.to_execution_address);
        let digest = hasher.finalize();

        let mut root = [0u8; 32];
        root.copy_from_slice(&digest);
        root
    }
}

/// A [`BlsToExecutionChange`] with the proof signature produced by the
/// withdrawal BLS key.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlsToExecutionChange {
    /// The credential rotation request.
    pub message: BlsToExecutionChange,
    /// BLS signature over the domain-separated signing root.
    #[serde_as(as = "Bytes")]
    pub signature: [u8; 96],
}

// =============================================================================
// Reqresp Entities
// =============================================================================

/// Handshake snapshot exchanged when two peers connect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Fork the sender is following.
    pub fork_digest: ForkDigest,
    /// Latest finalized block root.
    pub finalized_root: Root,
    /// Latest finalized epoch.
    pub finalized_epoch: Epoch,
    /// Current head block root.
    pub head_root: Root,
    /// Current head slot.
    pub head_slot: Slot,
}

/// Reason code attached to a connection teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodbyeReason(pub u64);

impl GoodbyeReason {
    /// Orderly shutdown of the local client.
    pub const CLIENT_SHUTDOWN: GoodbyeReason = GoodbyeReason(1);
    /// The peer is on a different network.
    pub const IRRELEVANT_NETWORK: GoodbyeReason = GoodbyeReason(2);
    /// The peer misbehaved at the protocol level.
    pub const FAULT: GoodbyeReason = GoodbyeReason(3);
    /// The peer exceeded its inbound resource quota.
    pub const RATE_LIMITED: GoodbyeReason = GoodbyeReason(128);
}

/// Node metadata served to peers on request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataResponse {
    /// Monotonic counter bumped whenever metadata changes.
    pub seq_number: u64,
    /// Attestation subnet participation bitfield.
    pub attnets: u64,
}

/// Request for a contiguous span of blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocksByRangeRequest {
    /// First slot requested.
    pub start_slot: Slot,
    /// Number of slots covered.
    pub count: u64,
    /// Stride between returned slots.
    pub step: u64,
}

/// Header summary of a signed block, as streamed in by-range responses.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBeaconBlockHeader {
    /// Slot the block was proposed in.
    pub slot: Slot,
    /// Proposer validator index.
    pub proposer_index: ValidatorIndex,
    /// Root of the parent block.
    pub parent_root: Root,
    /// Post-state root.
    pub state_root: Root,
    /// Root of the block body.
    pub body_root: Root,
    /// Proposer signature.
    #[serde_as(as = "Bytes")]
    pub signature: [u8; 96],
}
