//! # Protocol Definition Model
//!
//! Value-type descriptors for reqresp methods. A definition binds a method
//! name, a version, the wire encoding, lazily resolved schema descriptors,
//! a request renderer for logs, the context-byte rule for response framing,
//! and an optional inbound quota.
//!
//! Definitions are assembled once at startup by the registry and never
//! mutated per-connection.

use serde::{Deserialize, Serialize};
use shared_types::{
    BlocksByRangeRequest, ChainConfig, GoodbyeReason, MetadataResponse, SignedBeaconBlockHeader,
    Slot, StatusMessage,
};

use crate::error::ReqRespError;

/// Closed catalog of reqresp methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Peer handshake snapshot exchange.
    Status,
    /// Orderly connection teardown with a reason code.
    Goodbye,
    /// Liveness probe carrying a metadata sequence number.
    Ping,
    /// Full node metadata fetch.
    Metadata,
    /// Contiguous block download.
    BeaconBlocksByRange,
}

impl Method {
    /// Stable wire identifier of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Status => "status",
            Method::Goodbye => "goodbye",
            Method::Ping => "ping",
            Method::Metadata => "metadata",
            Method::BeaconBlocksByRange => "beacon_blocks_by_range",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol version. Several versions of one method may be live at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    V1,
    V2,
}

impl Version {
    /// Wire digit of the version.
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V1 => "1",
            Version::V2 => "2",
        }
    }
}

/// Supported wire encodings. Exactly one per definition; the codec and its
/// compression live below this layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// SSZ body framed in snappy blocks.
    SszSnappy,
}

impl Encoding {
    /// Wire suffix of the encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::SszSnappy => "ssz_snappy",
        }
    }
}

/// Union of decoded request bodies across the method catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestBody {
    Status(StatusMessage),
    Goodbye(GoodbyeReason),
    Ping(u64),
    Metadata,
    BeaconBlocksByRange(BlocksByRangeRequest),
}

/// Union of response payloads across the method catalog. By-range responses
/// stream one payload per block; every other method answers with a single
/// payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponsePayload {
    Status(StatusMessage),
    Goodbye(GoodbyeReason),
    Pong(u64),
    Metadata(MetadataResponse),
    Block(SignedBeaconBlockHeader),
}

impl ResponsePayload {
    /// The fork-identifying slot embedded in the payload, when it has one.
    /// Context-byte derivation reads only this.
    pub fn fork_slot(&self) -> Option<Slot> {
        match self {
            ResponsePayload::Block(header) => Some(header.slot),
            _ => None,
        }
    }
}

/// Externally-owned type descriptor, resolved lazily so definitions can be
/// assembled before every schema module has finished initializing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeSchema {
    /// Name of the described type.
    pub name: &'static str,
    /// Whether the concrete layout depends on the active fork.
    pub fork_dependent: bool,
}

/// Lazy handle to a [`TypeSchema`].
pub type SchemaRef = fn() -> TypeSchema;

/// Context-byte rule applied to every streamed response chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextBytesKind {
    /// No prefix; the response layout is fork-independent.
    Empty,
    /// Four-byte fork digest derived from the payload's slot.
    ForkDigest,
}

/// Inbound quota attached to a protocol definition.
#[derive(Clone, Copy, Debug)]
pub struct RateLimitQuota {
    /// Cost units admitted per window.
    pub quota: u64,
    /// Window length in milliseconds.
    pub quota_time_ms: u64,
    /// Cost of one request in quota units.
    pub cost: fn(&RequestBody) -> u64,
}

fn unit_cost(_request: &RequestBody) -> u64 {
    1
}

impl RateLimitQuota {
    /// Quota with the default cost of one unit per request.
    pub fn per_window(quota: u64, quota_time_ms: u64) -> Self {
        Self {
            quota,
            quota_time_ms,
            cost: unit_cost,
        }
    }

    /// Quota with a request-dependent cost function.
    pub fn with_cost(quota: u64, quota_time_ms: u64, cost: fn(&RequestBody) -> u64) -> Self {
        Self {
            quota,
            quota_time_ms,
            cost,
        }
    }
}

/// One reqresp method definition. `(method, version)` is unique within a
/// registry.
#[derive(Clone, Debug)]
pub struct ProtocolDefinition {
    /// Method identity, stable across versions.
    pub method: Method,
    /// Version of this definition instance.
    pub version: Version,
    /// Wire encoding of request and response bodies.
    pub encoding: Encoding,
    /// Request schema handle.
    pub request_schema: SchemaRef,
    /// Response schema handle.
    pub response_schema: SchemaRef,
    /// Pure request renderer, used for logging only.
    pub render_request: fn(&RequestBody) -> String,
    /// Context-byte rule for response framing.
    pub context_bytes: ContextBytesKind,
    /// Inbound quota; `None` means unlimited.
    pub inbound_rate_limit: Option<RateLimitQuota>,
}

impl ProtocolDefinition {
    /// Full protocol identifier advertised to the transport.
    pub fn protocol_id(&self) -> String {
        format!(
            "/pulsar/beacon/req/{}/{}/{}",
            self.method.as_str(),
            self.version.as_str(),
            self.encoding.as_str()
        )
    }

    /// Derive the context bytes for one response chunk.
    ///
    /// Callable before the concrete response type is known: only the
    /// payload's fork-identifying slot is read, never its schema.
    ///
    /// # Errors
    ///
    /// [`ReqRespError::MissingForkContext`] when the definition demands a
    /// fork digest but the payload carries no slot.
    pub fn resolve_context_bytes(
        &self,
        config: &ChainConfig,
        payload: &ResponsePayload,
    ) -> Result<Vec<u8>, ReqRespError> {
        match self.context_bytes {
            ContextBytesKind::Empty => Ok(Vec::new()),
            ContextBytesKind::ForkDigest => {
                let slot = payload
                    .fork_slot()
                    .ok_or(ReqRespError::MissingForkContext {
                        method: self.method,
                    })?;
                let fork = config.fork_at_slot(slot);
                let digest =
                    config
                        .fork_digest(fork.name)
                        .ok_or(ReqRespError::MissingForkContext {
                            method: self.method,
                        })?;
                Ok(digest.to_vec())
            }
        }
    }
}

/// One framed response chunk: `[context bytes][encoded body]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireChunk {
    /// Fork-identifying prefix, possibly empty.
    pub context_bytes: Vec<u8>,
    /// Encoded payload body.
    pub body: Vec<u8>,
}

impl Encoding {
    /// Decode a request body for `method`.
    ///
    /// # Errors
    ///
    /// [`ReqRespError::Codec`] when the bytes do not parse as the method's
    /// request schema (metadata requests must be empty-bodied).
    pub fn decode_request(&self, method: Method, bytes: &[u8]) -> Result<RequestBody, ReqRespError> {
        let codec = |e: bincode::Error| ReqRespError::Codec(e.to_string());
        match method {
            Method::Status => Ok(RequestBody::Status(
                bincode::deserialize(bytes).map_err(codec)?,
            )),
            Method::Goodbye => Ok(RequestBody::Goodbye(
                bincode::deserialize(bytes).map_err(codec)?,
            )),
            Method::Ping => Ok(RequestBody::Ping(
                bincode::deserialize(bytes).map_err(codec)?,
            )),
            Method::Metadata => {
                if bytes.is_empty() {
                    Ok(RequestBody::Metadata)
                } else {
                    Err(ReqRespError::Codec(
                        "metadata request must have an empty body".into(),
                    ))
                }
            }
            Method::BeaconBlocksByRange => Ok(RequestBody::BeaconBlocksByRange(
                bincode::deserialize(bytes).map_err(codec)?,
            )),
        }
    }

    /// Encode a response payload body.
    ///
    /// # Errors
    ///
    /// [`ReqRespError::Codec`] when serialization fails.
    pub fn encode_response(&self, payload: &ResponsePayload) -> Result<Vec<u8>, ReqRespError> {
        bincode::serialize(payload).map_err(|e| ReqRespError::Codec(e.to_string()))
    }
}
