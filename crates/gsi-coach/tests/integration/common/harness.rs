//! Runs an `Application` on an ephemeral port with the in-memory queue.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

use gsi_coach::{AppConfig, Application};
use gsi_dashboard::SubscriberRegistry;
use gsi_queue::InMemoryQueue;

pub type Viewer = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TestApp {
    pub addr: SocketAddr,
    pub registry: Arc<SubscriberRegistry>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Application::with_queue(AppConfig::default(), Arc::new(InMemoryQueue::new()))
            .unwrap();
        let registry = app.registry();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            app.serve(listener, async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
        });

        Self {
            addr,
            registry,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Connect a viewer and wait until it is registered.
    pub async fn connect_viewer(&self) -> Viewer {
        let expected = self.registry.len() + 1;
        let (viewer, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws", self.addr))
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.registry.len() < expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        viewer
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Open viewer sockets may keep the server from finishing gracefully
        let _ = tokio::time::timeout(Duration::from_secs(2), &mut self.handle).await;
        self.handle.abort();
    }
}

/// Next text frame as JSON, or `None` if nothing arrives within `wait`.
pub async fn next_state(viewer: &mut Viewer, wait: Duration) -> Option<serde_json::Value> {
    loop {
        let frame = tokio::time::timeout(wait, viewer.next()).await.ok()??.ok()?;
        if let Message::Text(text) = frame {
            return Some(serde_json::from_str(&text).unwrap());
        }
    }
}
