//! # Per-Peer Rate Limiter
//!
//! Fixed-window quota tracking, one limiter per peer connection record and
//! one counter per protocol within it. Windows reset when they elapse;
//! a request that would exceed the quota is refused without mutating state.
//!
//! This is deliberately a fixed-window counter, not a leaky bucket: bursts
//! up to the full quota are allowed at the start of every window, so up to
//! twice the quota can land inside a short interval spanning a window
//! boundary. Downstream quota values are tuned around that behavior.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::trace;

use crate::domain::protocol::{Method, ProtocolDefinition, RequestBody, Version};

/// Millisecond clock, injectable for tests.
pub type MillisClock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Wall-clock milliseconds since the epoch.
pub fn system_millis_clock() -> MillisClock {
    Arc::new(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    })
}

/// Consumption state of one protocol within the current window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RateLimitState {
    /// Cost units consumed since the window opened.
    consumed: u64,
    /// Window open timestamp in milliseconds.
    window_start_ms: u64,
}

/// Quota tracker owned by a single peer's connection record.
///
/// Counters are created lazily on the first request for a protocol and die
/// with the connection record, so there is no cross-peer contention by
/// construction.
pub struct PeerRateLimiter {
    states: HashMap<(Method, Version), RateLimitState>,
    clock: MillisClock,
}

impl PeerRateLimiter {
    /// Limiter on the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_millis_clock())
    }

    /// Limiter on an injected clock (for tests).
    pub fn with_clock(clock: MillisClock) -> Self {
        Self {
            states: HashMap::new(),
            clock,
        }
    }

    /// Decide whether one request may run.
    ///
    /// Computes the request cost, rolls the window over if it has elapsed,
    /// then admits iff `consumed + cost <= quota`. Admission consumes the
    /// cost; refusal leaves the counter untouched. Protocols without a
    /// configured quota always admit.
    pub fn admit(&mut self, definition: &ProtocolDefinition, request: &RequestBody) -> bool {
        let Some(limit) = definition.inbound_rate_limit else {
            return true;
        };

        let cost = (limit.cost)(request);
        let now = (self.clock)();
        let state = self
            .states
            .entry((definition.method, definition.version))
            .or_insert(RateLimitState {
                consumed: 0,
                window_start_ms: now,
            });

        if now.saturating_sub(state.window_start_ms) >= limit.quota_time_ms {
            state.consumed = 0;
            state.window_start_ms = now;
        }

        if state.consumed.saturating_add(cost) > limit.quota {
            trace!(
                method = %definition.method,
                consumed = state.consumed,
                cost,
                quota = limit.quota,
                "request refused by rate limiter"
            );
            return false;
        }

        state.consumed += cost;
        true
    }

    /// Number of protocols with live counters (diagnostics).
    pub fn tracked_protocols(&self) -> usize {
        self.states.len()
    }
}

impl Default for PeerRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
