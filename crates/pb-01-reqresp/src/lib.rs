//! # Reqresp Subsystem (pb-01)
//!
//! The request/response side of the p2p message layer: a declarative
//! registry of versioned protocol definitions plus the per-peer inbound
//! rate-limiting discipline the transport consults before a handler runs.
//!
//! ## Architecture Role
//!
//! ```text
//! [Transport / Mux] ──inbound stream──→ [ReqRespService]
//!                                             │ lookup (method, version)
//!                                             │ admit (fixed-window quota)
//!                                             ↓
//!                                     [registered handler]
//!                                             ↓ chunked response
//!                                  [context bytes ‖ encoded body] ...
//! ```
//!
//! ## Failure discipline
//!
//! - Duplicate `(method, version)` registration is a startup-fatal
//!   configuration error, surfaced as `RegistryError` and never recovered.
//! - Quota violations refuse the single request; the peer connection and
//!   the process keep running.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::protocol::{
    ContextBytesKind, Encoding, Method, ProtocolDefinition, RateLimitQuota, RequestBody,
    ResponsePayload, SchemaRef, TypeSchema, Version, WireChunk,
};
pub use domain::rate_limiter::PeerRateLimiter;
pub use domain::registry::{ModuleBundle, ProtocolGenerator, ProtocolRegistry, RegistryError};
pub use error::{HandlerError, ReqRespError};
pub use ports::inbound::ReqRespApi;
pub use ports::outbound::{RequestHandler, ResponseStream};
pub use service::ReqRespService;
