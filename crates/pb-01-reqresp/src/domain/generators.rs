//! # Standard Protocol Generators
//!
//! The fixed catalog a node registers at startup. Each generator is a pure
//! factory from the module bundle to one protocol definition; handlers are
//! attached by the caller at registration time.

use crate::domain::protocol::{
    ContextBytesKind, Encoding, Method, ProtocolDefinition, RateLimitQuota, RequestBody,
    TypeSchema, Version,
};
use crate::domain::registry::{ModuleBundle, ProtocolGenerator};

/// The full startup catalog, in registration order.
pub fn standard_protocols() -> &'static [ProtocolGenerator] {
    &[
        status_v1,
        goodbye_v1,
        ping_v1,
        metadata_v1,
        metadata_v2,
        beacon_blocks_by_range_v1,
        beacon_blocks_by_range_v2,
    ]
}

// =============================================================================
// Schema descriptors (lazily resolved)
// =============================================================================

fn status_schema() -> TypeSchema {
    TypeSchema {
        name: "StatusMessage",
        fork_dependent: false,
    }
}

fn goodbye_schema() -> TypeSchema {
    TypeSchema {
        name: "GoodbyeReason",
        fork_dependent: false,
    }
}

fn ping_schema() -> TypeSchema {
    TypeSchema {
        name: "Ping",
        fork_dependent: false,
    }
}

fn empty_schema() -> TypeSchema {
    TypeSchema {
        name: "Empty",
        fork_dependent: false,
    }
}

fn metadata_schema() -> TypeSchema {
    TypeSchema {
        name: "MetadataResponse",
        fork_dependent: false,
    }
}

fn blocks_by_range_request_schema() -> TypeSchema {
    TypeSchema {
        name: "BlocksByRangeRequest",
        fork_dependent: false,
    }
}

fn signed_block_schema() -> TypeSchema {
    TypeSchema {
        name: "SignedBeaconBlockHeader",
        fork_dependent: true,
    }
}

// =============================================================================
// Request renderers (logging only)
// =============================================================================

fn render_status(request: &RequestBody) -> String {
    match request {
        RequestBody::Status(status) => format!(
            "fork_digest={}, finalized_epoch={}, head_slot={}",
            hex::encode(status.fork_digest),
            status.finalized_epoch,
            status.head_slot
        ),
        other => format!("{other:?}"),
    }
}

fn render_goodbye(request: &RequestBody) -> String {
    match request {
        RequestBody::Goodbye(reason) => format!("reason={}", reason.0),
        other => format!("{other:?}"),
    }
}

fn render_ping(request: &RequestBody) -> String {
    match request {
        RequestBody::Ping(seq) => format!("seq={seq}"),
        other => format!("{other:?}"),
    }
}

fn render_metadata(_request: &RequestBody) -> String {
    String::new()
}

fn render_blocks_by_range(request: &RequestBody) -> String {
    match request {
        RequestBody::BeaconBlocksByRange(req) => format!(
            "start_slot={}, count={}, step={}",
            req.start_slot, req.count, req.step
        ),
        other => format!("{other:?}"),
    }
}

// =============================================================================
// Cost functions
// =============================================================================

fn blocks_by_range_cost(request: &RequestBody) -> u64 {
    match request {
        RequestBody::BeaconBlocksByRange(req) => req.count,
        _ => 1,
    }
}

// =============================================================================
// Generators
// =============================================================================

/// Status handshake, one quota unit per request.
pub fn status_v1(_modules: &ModuleBundle) -> ProtocolDefinition {
    ProtocolDefinition {
        method: Method::Status,
        version: Version::V1,
        encoding: Encoding::SszSnappy,
        request_schema: status_schema,
        response_schema: status_schema,
        render_request: render_status,
        context_bytes: ContextBytesKind::Empty,
        inbound_rate_limit: Some(RateLimitQuota::per_window(5, 15_000)),
    }
}

/// Goodbye teardown notice.
pub fn goodbye_v1(_modules: &ModuleBundle) -> ProtocolDefinition {
    ProtocolDefinition {
        method: Method::Goodbye,
        version: Version::V1,
        encoding: Encoding::SszSnappy,
        request_schema: goodbye_schema,
        response_schema: goodbye_schema,
        render_request: render_goodbye,
        context_bytes: ContextBytesKind::Empty,
        inbound_rate_limit: Some(RateLimitQuota::per_window(1, 10_000)),
    }
}

/// Liveness probe.
pub fn ping_v1(_modules: &ModuleBundle) -> ProtocolDefinition {
    ProtocolDefinition {
        method: Method::Ping,
        version: Version::V1,
        encoding: Encoding::SszSnappy,
        request_schema: ping_schema,
        response_schema: ping_schema,
        render_request: render_ping,
        context_bytes: ContextBytesKind::Empty,
        inbound_rate_limit: Some(RateLimitQuota::per_window(2, 10_000)),
    }
}

/// Metadata fetch, original layout.
pub fn metadata_v1(_modules: &ModuleBundle) -> ProtocolDefinition {
    ProtocolDefinition {
        method: Method::Metadata,
        version: Version::V1,
        encoding: Encoding::SszSnappy,
        request_schema: empty_schema,
        response_schema: metadata_schema,
        render_request: render_metadata,
        context_bytes: ContextBytesKind::Empty,
        inbound_rate_limit: Some(RateLimitQuota::per_window(2, 5_000)),
    }
}

/// Metadata fetch with the extended layout.
pub fn metadata_v2(_modules: &ModuleBundle) -> ProtocolDefinition {
    ProtocolDefinition {
        version: Version::V2,
        ..metadata_v1(_modules)
    }
}

/// Block range download; quota counted in requested blocks.
pub fn beacon_blocks_by_range_v1(_modules: &ModuleBundle) -> ProtocolDefinition {
    ProtocolDefinition {
        method: Method::BeaconBlocksByRange,
        version: Version::V1,
        encoding: Encoding::SszSnappy,
        request_schema: blocks_by_range_request_schema,
        response_schema: signed_block_schema,
        render_request: render_blocks_by_range,
        context_bytes: ContextBytesKind::Empty,
        inbound_rate_limit: Some(RateLimitQuota::with_cost(
            500,
            10_000,
            blocks_by_range_cost,
        )),
    }
}

/// Block range download with fork-digest context bytes on every chunk,
/// required once response layouts became fork-dependent.
pub fn beacon_blocks_by_range_v2(modules: &ModuleBundle) -> ProtocolDefinition {
    ProtocolDefinition {
        version: Version::V2,
        context_bytes: ContextBytesKind::ForkDigest,
        ..beacon_blocks_by_range_v1(modules)
    }
}
