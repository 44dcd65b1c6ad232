//! Inbound ports (API) for the reqresp subsystem.

use std::pin::Pin;

use async_trait::async_trait;
use shared_types::PeerId;
use tokio_stream::Stream;

use crate::domain::protocol::WireChunk;
use crate::error::ReqRespError;

/// Stream of framed response chunks handed back to the transport.
pub type WireChunkStream = Pin<Box<dyn Stream<Item = Result<WireChunk, ReqRespError>> + Send>>;

/// Primary API the transport layer drives per inbound request stream.
#[async_trait]
pub trait ReqRespApi: Send + Sync {
    /// Resolve, admit, and serve one inbound request.
    ///
    /// # Errors
    ///
    /// - [`ReqRespError::UnknownProtocol`] for unadvertised identifiers.
    /// - [`ReqRespError::RateLimited`] when the peer's window quota is
    ///   exhausted; the transport should close the stream and penalize.
    /// - [`ReqRespError::Codec`] when the request body does not parse.
    async fn handle_inbound_request(
        &self,
        peer: PeerId,
        protocol_id: &str,
        request_bytes: &[u8],
    ) -> Result<WireChunkStream, ReqRespError>;

    /// Drop all rate-limit state owned by a disconnecting peer.
    fn on_peer_disconnected(&self, peer: &PeerId);
}
