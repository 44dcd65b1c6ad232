//! Reqresp admission matrix over the full registry + service stack.

#[cfg(test)]
mod tests {
    use crate::support::test_config;
    use async_trait::async_trait;
    use pb_01_reqresp::domain::generators;
    use pb_01_reqresp::domain::rate_limiter::MillisClock;
    use pb_01_reqresp::{
        HandlerError, ModuleBundle, ProtocolRegistry, ReqRespApi, ReqRespError, ReqRespService,
        RequestBody, RequestHandler, ResponsePayload, ResponseStream,
    };
    use shared_types::PeerId;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use tokio_stream::StreamExt;

    struct EchoHandler;

    #[async_trait]
    impl RequestHandler for EchoHandler {
        async fn handle(
            &self,
            _peer: PeerId,
            request: RequestBody,
        ) -> Result<ResponseStream, HandlerError> {
            let payload = match request {
                RequestBody::Ping(seq) => ResponsePayload::Pong(seq),
                RequestBody::Status(status) => ResponsePayload::Status(status),
                _ => return Err(HandlerError::Internal("unsupported in echo test".into())),
            };
            let chunks: Vec<Result<ResponsePayload, HandlerError>> = vec![Ok(payload)];
            Ok(Box::pin(tokio_stream::iter(chunks)))
        }
    }

    fn stack() -> (ReqRespService, Arc<AtomicU64>) {
        let mut registry = ProtocolRegistry::new(ModuleBundle {
            config: test_config(),
        });
        registry
            .register(generators::ping_v1, Arc::new(EchoHandler))
            .unwrap();
        registry
            .register(generators::status_v1, Arc::new(EchoHandler))
            .unwrap();

        let now = Arc::new(AtomicU64::new(0));
        let handle = now.clone();
        let clock: MillisClock = Arc::new(move || handle.load(Ordering::SeqCst));
        (
            ReqRespService::with_clock(Arc::new(registry), clock),
            now,
        )
    }

    fn ping_bytes(seq: u64) -> Vec<u8> {
        bincode::serialize(&seq).unwrap()
    }

    const PING: &str = "/pulsar/beacon/req/ping/1/ssz_snappy";

    /// Quota Q admits exactly Q requests per window; request Q+1 fails; a
    /// full window later Q more are admitted.
    #[tokio::test]
    async fn test_admission_matrix() {
        crate::support::init_tracing();
        let (service, now) = stack();
        let peer: PeerId = [7; 32];

        // Ping quota is 2 per 10s window.
        for seq in 0..2 {
            let mut stream = service
                .handle_inbound_request(peer, PING, &ping_bytes(seq))
                .await
                .unwrap();
            let chunk = stream.next().await.unwrap().unwrap();
            let payload: ResponsePayload = bincode::deserialize(&chunk.body).unwrap();
            assert_eq!(payload, ResponsePayload::Pong(seq));
        }

        let refused = service
            .handle_inbound_request(peer, PING, &ping_bytes(2))
            .await;
        assert!(matches!(refused, Err(ReqRespError::RateLimited { .. })));

        now.store(10_000, Ordering::SeqCst);
        for seq in 0..2 {
            assert!(service
                .handle_inbound_request(peer, PING, &ping_bytes(seq))
                .await
                .is_ok());
        }
        assert!(matches!(
            service.handle_inbound_request(peer, PING, &ping_bytes(9)).await,
            Err(ReqRespError::RateLimited { .. })
        ));
    }

    /// The documented fixed-window boundary property: 2×Q requests inside
    /// a short interval spanning the boundary all succeed.
    #[tokio::test]
    async fn test_double_burst_across_window_boundary() {
        let (service, now) = stack();
        let peer: PeerId = [8; 32];

        now.store(9_998, Ordering::SeqCst);
        for seq in 0..2 {
            assert!(service
                .handle_inbound_request(peer, PING, &ping_bytes(seq))
                .await
                .is_ok());
        }

        now.store(19_998, Ordering::SeqCst);
        for seq in 0..2 {
            assert!(service
                .handle_inbound_request(peer, PING, &ping_bytes(seq))
                .await
                .is_ok());
        }
    }

    /// Quota exhaustion on one protocol leaves the peer's other protocols
    /// and every other peer untouched.
    #[tokio::test]
    async fn test_isolation_across_peers_and_protocols() {
        let (service, _) = stack();
        let noisy: PeerId = [1; 32];
        let quiet: PeerId = [2; 32];

        for seq in 0..2 {
            service
                .handle_inbound_request(noisy, PING, &ping_bytes(seq))
                .await
                .unwrap();
        }
        assert!(matches!(
            service.handle_inbound_request(noisy, PING, &ping_bytes(2)).await,
            Err(ReqRespError::RateLimited { .. })
        ));

        // Same peer, different protocol: still admitted.
        let status = shared_types::StatusMessage {
            fork_digest: [0; 4],
            finalized_root: [0; 32],
            finalized_epoch: 0,
            head_root: [0; 32],
            head_slot: 0,
        };
        let status_bytes = bincode::serialize(&status).unwrap();
        assert!(service
            .handle_inbound_request(noisy, "/pulsar/beacon/req/status/1/ssz_snappy", &status_bytes)
            .await
            .is_ok());

        // Different peer, exhausted protocol: still admitted.
        assert!(service
            .handle_inbound_request(quiet, PING, &ping_bytes(0))
            .await
            .is_ok());
    }

    /// A protocol with no configured quota admits arbitrarily many
    /// requests.
    #[tokio::test]
    async fn test_unlimited_protocol() {
        use pb_01_reqresp::{
            ContextBytesKind, Encoding, Method, ProtocolDefinition, TypeSchema, Version,
        };

        fn schema() -> TypeSchema {
            TypeSchema {
                name: "Ping",
                fork_dependent: false,
            }
        }
        fn render(_request: &RequestBody) -> String {
            String::new()
        }
        fn unlimited_ping(_modules: &ModuleBundle) -> ProtocolDefinition {
            ProtocolDefinition {
                method: Method::Ping,
                version: Version::V2,
                encoding: Encoding::SszSnappy,
                request_schema: schema,
                response_schema: schema,
                render_request: render,
                context_bytes: ContextBytesKind::Empty,
                inbound_rate_limit: None,
            }
        }

        let mut registry = ProtocolRegistry::new(ModuleBundle {
            config: test_config(),
        });
        registry
            .register(unlimited_ping, Arc::new(EchoHandler))
            .unwrap();
        let service = ReqRespService::new(Arc::new(registry));

        for seq in 0..100 {
            assert!(service
                .handle_inbound_request([3; 32], "/pulsar/beacon/req/ping/2/ssz_snappy", &ping_bytes(seq))
                .await
                .is_ok());
        }
    }
}
