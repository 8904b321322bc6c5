//! HTTP server implementation using axum.
//!
//! Routes:
//! - `/`        ingestion endpoint (POST enqueues, other methods are ignored)
//! - `/ws`      viewer subscription (WebSocket upgrade)
//! - `/health`  liveness and subscriber count
//! - `/metrics` Prometheus text exposition

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{any, get};
use axum::Router;
use futures_util::stream::{SplitSink, StreamExt};
use futures_util::SinkExt;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use gsi_queue::SnapshotQueue;
use gsi_telemetry::Metrics;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult, SendError};
use crate::registry::{SubscriberRegistry, SubscriberSink};

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    queue: Arc<dyn SnapshotQueue>,
    registry: Arc<SubscriberRegistry>,
}

impl AppState {
    pub fn new(queue: Arc<dyn SnapshotQueue>, registry: Arc<SubscriberRegistry>) -> Self {
        Self { queue, registry }
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(ingest))
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Enqueue one raw snapshot.
///
/// The response only confirms the enqueue attempt: a push failure is logged
/// and counted, never reported to the game client.
async fn ingest(State(state): State<AppState>, method: Method, body: Bytes) -> StatusCode {
    if method != Method::POST {
        return StatusCode::OK;
    }

    Metrics::snapshot_ingested();
    if let Err(e) = state.queue.push(body.to_vec()).await {
        warn!(error = %e, backend = state.queue.backend(), "Failed to enqueue snapshot");
        Metrics::ingest_push_failed();
    }
    StatusCode::OK
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    subscribers: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        subscribers: state.registry.len(),
    })
}

async fn metrics() -> Response {
    match gsi_telemetry::encode_text() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// WebSocket upgrade handler.
async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    if state.registry.is_full() {
        warn!(
            current = state.registry.len(),
            max = state.registry.max(),
            "Subscriber limit reached"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "Too many connections").into_response();
    }

    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Outbound half of a viewer WebSocket.
struct WsSink {
    sender: Mutex<SplitSink<WebSocket, Message>>,
}

#[async_trait]
impl SubscriberSink for WsSink {
    async fn send(&self, payload: &str) -> Result<(), SendError> {
        self.sender
            .lock()
            .await
            .send(Message::Text(payload.to_owned().into()))
            .await
            .map_err(|e| SendError::Transport(e.to_string()))
    }
}

/// Register the connection and watch it for disconnect.
///
/// Inbound frames only signal liveness. The connection ends on Close, a read
/// error, or removal from the registry after a failed send.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let (sender, mut receiver) = socket.split();
    let sink = Arc::new(WsSink {
        sender: Mutex::new(sender),
    });

    let Some(subscriber) = state.registry.add(sink) else {
        warn!("Subscriber limit reached during upgrade");
        return;
    };
    let id = subscriber.id();
    info!(subscriber = id, subscribers = state.registry.len(), "Subscriber connected");

    let closed = subscriber.closed().clone();
    loop {
        tokio::select! {
            _ = closed.cancelled() => {
                debug!(subscriber = id, "Subscriber removed by dispatch");
                break;
            }
            frame = receiver.next() => {
                match frame {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(subscriber = id, "Subscriber closed connection");
                        break;
                    }
                    Some(Err(e)) => {
                        debug!(subscriber = id, error = %e, "WebSocket receive error");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.registry.remove(id);
    info!(subscriber = id, subscribers = state.registry.len(), "Subscriber disconnected");
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn run_server(
    state: AppState,
    config: &DashboardConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> DashboardResult<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| DashboardError::Bind { addr, source })?;
    serve(listener, state, shutdown).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> DashboardResult<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Dashboard server listening");
    }

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(DashboardError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use gsi_queue::InMemoryQueue;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<InMemoryQueue>, Arc<SubscriberRegistry>) {
        let queue = Arc::new(InMemoryQueue::new());
        let registry = Arc::new(SubscriberRegistry::new(4));
        let state = AppState::new(queue.clone(), registry.clone());
        (create_router(state), queue, registry)
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_post_enqueues_raw_body() {
        let (router, queue, _) = app();
        let payload = br#"{"map":{"clock_time":610,"game_state":"DOTA_GAMERULES_STATE_GAME_IN_PROGRESS"}}"#;

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .body(Body::from(payload.to_vec()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop().await.unwrap(), payload.to_vec());
    }

    #[tokio::test]
    async fn test_post_enqueues_malformed_body_unchanged() {
        let (router, queue, _) = app();
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(queue.pop().await.unwrap(), b"not json".to_vec());
    }

    #[tokio::test]
    async fn test_non_post_ignored() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let (router, queue, _) = app();
            let response = router
                .oneshot(
                    Request::builder()
                        .method(method.clone())
                        .uri("/")
                        .body(Body::from("{}"))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{method}");
            assert!(body_bytes(response).await.is_empty());
            assert!(queue.is_empty(), "{method} must not enqueue");
        }
    }

    #[tokio::test]
    async fn test_health_reports_subscribers() {
        let (router, _, registry) = app();
        registry
            .add(Arc::new(crate::registry::tests::RecordingSink::default()))
            .unwrap();

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["subscribers"], 1);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (router, _, _) = app();
        Metrics::snapshot_ingested();

        let response = router
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.contains("gsi_snapshots_ingested_total"));
    }
}
