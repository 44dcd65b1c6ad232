//! Outbound ports for the reqresp subsystem.

use std::pin::Pin;

use async_trait::async_trait;
use shared_types::PeerId;
use tokio_stream::Stream;

use crate::domain::protocol::{RequestBody, ResponsePayload};
use crate::error::HandlerError;

/// Stream of response payloads produced by a handler. By-range handlers
/// yield one payload per block; unary methods yield exactly one.
pub type ResponseStream =
    Pin<Box<dyn Stream<Item = Result<ResponsePayload, HandlerError>> + Send>>;

/// Caller-supplied asynchronous handler for one method.
///
/// The registry stores handlers but never invokes them; invocation is the
/// service's job, after protocol resolution and rate-limit admission.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Serve one admitted request.
    async fn handle(&self, peer: PeerId, request: RequestBody)
        -> Result<ResponseStream, HandlerError>;
}
