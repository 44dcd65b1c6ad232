//! # Shared Types Crate
//!
//! Consensus primitives, the immutable chain configuration, the head-state
//! view, and the message entities exchanged over the p2p layer.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Frozen Configuration**: `ChainConfig` is built exactly once at process
//!   start and exposes no mutation path afterwards.
//! - **Pure Predicates**: State validity checks are deterministic functions
//!   over an immutable head-state snapshot; they never perform I/O.

pub mod config;
pub mod entities;
pub mod state;

pub use config::{ChainConfig, ChainConfigBuilder, ChainConfigError, ForkScheduleEntry};
pub use entities::*;
pub use state::{
    bls_withdrawal_credentials, check_bls_to_execution_change, BlsChangeInvalid, HeadStateView,
    StateAccessError, Validator, BLS_WITHDRAWAL_PREFIX, EXECUTION_ADDRESS_PREFIX,
};
