//! Validation pipelines, one module per gossip message family.
//!
//! Every family follows the same staging: dedup first (cheapest), pure
//! structural checks against the head snapshot next, signature
//! verification last (most expensive, awaited). Any non-accept outcome at
//! an earlier stage skips all later stages.

pub mod bls_to_execution_change;
