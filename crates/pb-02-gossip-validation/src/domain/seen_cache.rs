//! # Duplicate-Suppression Cache
//!
//! Per-message-class set membership: "has an equivalent message for this
//! subject already been accepted?" Validators consult it before any
//! cryptographic work, and mark subjects only after an ACCEPT.
//!
//! Membership is monotonic within the retention horizon; the owning pool
//! evicts on epoch boundaries as the chain progresses. Test-and-insert
//! operations are individually atomic, but check-then-mark across an
//! in-flight validation is deliberately not one critical section: two
//! concurrent equivalent messages may both verify, and the first to mark
//! wins. Best-effort de-duplication, not exactly-once.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;
use shared_types::{Epoch, ValidatorIndex};

/// Concurrent seen-set keyed by a message-class-specific subject key.
///
/// Consumers own one instance per message class; there is no process-wide
/// shared cache.
pub struct SeenCache<K: Eq + Hash> {
    entries: Mutex<HashMap<K, Epoch>>,
}

impl<K: Eq + Hash> SeenCache<K> {
    /// Empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Whether `key` was marked within the current horizon.
    pub fn has_seen(&self, key: &K) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Mark `key` as seen at `epoch`. Returns `false` when the key was
    /// already present (the earlier record is kept).
    pub fn mark_seen(&self, key: K, epoch: Epoch) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, epoch);
        true
    }

    /// Evict every record marked before `horizon`. Driven by the owning
    /// pool on epoch boundaries, not by this cache.
    pub fn prune_up_to(&self, horizon: Epoch) {
        self.entries.lock().retain(|_, &mut epoch| epoch >= horizon);
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<K: Eq + Hash> Default for SeenCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// The withdrawal-credential-change pool: one record per subject validator.
pub type BlsChangePool = SeenCache<ValidatorIndex>;
