//! Reqresp error types.

use thiserror::Error;

use crate::domain::protocol::Method;

/// Failures raised by a registered request handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler cannot serve the request right now.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The handler failed internally.
    #[error("internal handler failure: {0}")]
    Internal(String),
}

/// Failures on the inbound request path.
///
/// A closed enumeration: the transport layer switches on these to decide
/// whether to close the stream, penalize the peer, or simply report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReqRespError {
    /// No protocol registered under the requested identifier.
    #[error("unknown protocol: {protocol_id}")]
    UnknownProtocol { protocol_id: String },

    /// The peer exceeded the protocol's inbound quota for this window.
    #[error("rate limit exceeded on {protocol_id}")]
    RateLimited { protocol_id: String },

    /// The request or response body could not be (de)serialized.
    #[error("codec failure: {0}")]
    Codec(String),

    /// A fork-digest-framed response payload carried no fork-identifying
    /// field to derive context bytes from.
    #[error("response to {method} carries no fork-identifying field for context bytes")]
    MissingForkContext { method: Method },

    /// The registered handler failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}
