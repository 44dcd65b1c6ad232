//! # Reqresp Service
//!
//! Application service that implements [`ReqRespApi`] over the protocol
//! registry: protocol resolution, request decoding, per-peer rate-limit
//! admission, handler dispatch, and context-byte response framing.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::PeerId;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::protocol::WireChunk;
use crate::domain::rate_limiter::{system_millis_clock, MillisClock, PeerRateLimiter};
use crate::domain::registry::ProtocolRegistry;
use crate::error::ReqRespError;
use crate::ports::inbound::{ReqRespApi, WireChunkStream};

/// Reqresp service over a populated registry.
///
/// Rate-limit state is scoped per peer: a limiter is created lazily on a
/// peer's first request and destroyed when the transport reports the
/// disconnect, so counters never leak across connections.
pub struct ReqRespService {
    registry: Arc<ProtocolRegistry>,
    limiters: Mutex<HashMap<PeerId, PeerRateLimiter>>,
    clock: MillisClock,
}

impl ReqRespService {
    /// Service on the system clock.
    pub fn new(registry: Arc<ProtocolRegistry>) -> Self {
        Self::with_clock(registry, system_millis_clock())
    }

    /// Service on an injected clock (for tests).
    pub fn with_clock(registry: Arc<ProtocolRegistry>, clock: MillisClock) -> Self {
        Self {
            registry,
            limiters: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Number of peers currently holding rate-limit state (diagnostics).
    pub fn tracked_peers(&self) -> usize {
        self.limiters.lock().len()
    }
}

#[async_trait]
impl ReqRespApi for ReqRespService {
    async fn handle_inbound_request(
        &self,
        peer: PeerId,
        protocol_id: &str,
        request_bytes: &[u8],
    ) -> Result<WireChunkStream, ReqRespError> {
        let entry = self.registry.by_protocol_id(protocol_id).ok_or_else(|| {
            ReqRespError::UnknownProtocol {
                protocol_id: protocol_id.to_string(),
            }
        })?;
        let definition = entry.definition.clone();
        let handler = entry.handler.clone();

        let request = definition
            .encoding
            .decode_request(definition.method, request_bytes)?;

        // Admission happens before the handler runs; the lock is released
        // before any await point.
        let admitted = {
            let mut limiters = self.limiters.lock();
            let limiter = limiters
                .entry(peer)
                .or_insert_with(|| PeerRateLimiter::with_clock(self.clock.clone()));
            limiter.admit(&definition, &request)
        };
        if !admitted {
            warn!(
                protocol = %protocol_id,
                peer = %hex::encode(peer),
                "inbound request refused: quota exhausted"
            );
            return Err(ReqRespError::RateLimited {
                protocol_id: protocol_id.to_string(),
            });
        }

        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            protocol = %protocol_id,
            peer = %hex::encode(peer),
            body = %(definition.render_request)(&request),
            "serving inbound request"
        );

        let stream = handler.handle(peer, request).await?;

        let config = self.registry.modules().config.clone();
        let framed = stream.map(move |item| -> Result<WireChunk, ReqRespError> {
            let payload = item?;
            let context_bytes = definition.resolve_context_bytes(&config, &payload)?;
            let body = definition.encoding.encode_response(&payload)?;
            Ok(WireChunk {
                context_bytes,
                body,
            })
        });
        Ok(Box::pin(framed))
    }

    fn on_peer_disconnected(&self, peer: &PeerId) {
        if self.limiters.lock().remove(peer).is_some() {
            debug!(peer = %hex::encode(peer), "dropped rate-limit state on disconnect");
        }
    }
}
