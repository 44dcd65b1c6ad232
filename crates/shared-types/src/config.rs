//! # Chain Configuration
//!
//! The network-parameter preset selected at process start. `ChainConfig` is
//! constructed through [`ChainConfigBuilder`] exactly once and exposes no
//! mutation path afterwards; components receive it behind an `Arc`.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::entities::{Epoch, ForkDigest, ForkName, ForkVersion, Root, Slot};

/// Activation record of one fork in the schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForkScheduleEntry {
    /// Fork being activated.
    pub name: ForkName,
    /// Wire version bytes of the fork.
    pub version: ForkVersion,
    /// First epoch at which the fork is active.
    pub epoch: Epoch,
}

/// Errors raised while assembling a [`ChainConfig`].
///
/// All of these are startup-fatal configuration errors; a node must not come
/// up with a malformed fork schedule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainConfigError {
    /// The fork schedule contained no entries.
    #[error("fork schedule is empty")]
    EmptySchedule,

    /// The first schedule entry does not activate at genesis.
    #[error("fork schedule must start at epoch 0, found epoch {0}")]
    ScheduleNotAnchoredAtGenesis(Epoch),

    /// Activation epochs are not strictly increasing.
    #[error("fork schedule epochs must strictly increase: {previous} then {current}")]
    NonMonotonicSchedule { previous: Epoch, current: Epoch },

    /// Slots-per-epoch must be positive.
    #[error("slots_per_epoch must be greater than zero")]
    ZeroSlotsPerEpoch,
}

/// Immutable network-parameter preset.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    slots_per_epoch: u64,
    genesis_validators_root: Root,
    schedule: Vec<ForkScheduleEntry>,
}

impl ChainConfig {
    /// Start assembling a configuration.
    pub fn builder() -> ChainConfigBuilder {
        ChainConfigBuilder::default()
    }

    /// Slots per epoch of this network.
    pub fn slots_per_epoch(&self) -> u64 {
        self.slots_per_epoch
    }

    /// Root committed to by every signing domain on this network.
    pub fn genesis_validators_root(&self) -> Root {
        self.genesis_validators_root
    }

    /// Epoch containing `slot`.
    pub fn epoch_at_slot(&self, slot: Slot) -> Epoch {
        slot / self.slots_per_epoch
    }

    /// The fork active at `epoch`.
    pub fn fork_at_epoch(&self, epoch: Epoch) -> &ForkScheduleEntry {
        // The builder guarantees a genesis-anchored, strictly increasing
        // schedule, so at least the first entry always matches.
        self.schedule
            .iter()
            .rev()
            .find(|entry| entry.epoch <= epoch)
            .unwrap_or(&self.schedule[0])
    }

    /// The fork active at `slot`.
    pub fn fork_at_slot(&self, slot: Slot) -> &ForkScheduleEntry {
        self.fork_at_epoch(self.epoch_at_slot(slot))
    }

    /// Version bytes of a named fork, if it is scheduled.
    pub fn fork_version(&self, name: ForkName) -> Option<ForkVersion> {
        self.schedule
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.version)
    }

    /// Wire digest of a fork: the first four bytes of
    /// `sha256(version || genesis_validators_root)`.
    pub fn fork_digest(&self, name: ForkName) -> Option<ForkDigest> {
        let version = self.fork_version(name)?;

        let mut hasher = Sha256::new();
        hasher.update(version);
        hasher.update(self.genesis_validators_root);
        let digest = hasher.finalize();

        let mut out = [0u8; 4];
        out.copy_from_slice(&digest[..4]);
        Some(out)
    }

    /// The complete fork schedule, in activation order.
    pub fn fork_schedule(&self) -> &[ForkScheduleEntry] {
        &self.schedule
    }
}

/// Builder for [`ChainConfig`]. Consumed by `build`, so no handle to the
/// configuration survives that could mutate it later.
#[derive(Debug, Default)]
pub struct ChainConfigBuilder {
    slots_per_epoch: Option<u64>,
    genesis_validators_root: Option<Root>,
    schedule: Vec<ForkScheduleEntry>,
}

impl ChainConfigBuilder {
    /// Set slots per epoch.
    pub fn slots_per_epoch(mut self, slots: u64) -> Self {
        self.slots_per_epoch = Some(slots);
        self
    }

    /// Set the genesis validators root.
    pub fn genesis_validators_root(mut self, root: Root) -> Self {
        self.genesis_validators_root = Some(root);
        self
    }

    /// Append a fork activation. Entries must be pushed in activation order.
    pub fn fork(mut self, name: ForkName, version: ForkVersion, epoch: Epoch) -> Self {
        self.schedule.push(ForkScheduleEntry {
            name,
            version,
            epoch,
        });
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainConfigError`] when the schedule is empty, does not
    /// activate at genesis, is not strictly increasing, or slots-per-epoch
    /// is zero. All are startup-fatal.
    pub fn build(self) -> Result<ChainConfig, ChainConfigError> {
        let slots_per_epoch = self.slots_per_epoch.unwrap_or(32);
        if slots_per_epoch == 0 {
            return Err(ChainConfigError::ZeroSlotsPerEpoch);
        }

        let first = self.schedule.first().ok_or(ChainConfigError::EmptySchedule)?;
        if first.epoch != 0 {
            return Err(ChainConfigError::ScheduleNotAnchoredAtGenesis(first.epoch));
        }

        for pair in self.schedule.windows(2) {
            if pair[1].epoch <= pair[0].epoch {
                return Err(ChainConfigError::NonMonotonicSchedule {
                    previous: pair[0].epoch,
                    current: pair[1].epoch,
                });
            }
        }

        Ok(ChainConfig {
            slots_per_epoch,
            genesis_validators_root: self.genesis_validators_root.unwrap_or([0u8; 32]),
            schedule: self.schedule,
        })
    }
}
