//! WebSocket subscription tests over a real listener.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::{self, Message};

use gsi_core::{BuybackStatus, DashboardState};
use gsi_dashboard::{run_dispatch_loop, serve, AppState, Dispatcher, SubscriberRegistry};
use gsi_queue::InMemoryQueue;

struct TestServer {
    addr: SocketAddr,
    registry: Arc<SubscriberRegistry>,
    dispatcher: Dispatcher,
    _shutdown: oneshot::Sender<()>,
}

async fn start(max_connections: usize) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let registry = Arc::new(SubscriberRegistry::new(max_connections));
    let (dispatcher, intake) = Dispatcher::channel();
    tokio::spawn(run_dispatch_loop(
        intake,
        registry.clone(),
        Duration::from_secs(1),
    ));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let state = AppState::new(Arc::new(InMemoryQueue::new()), registry.clone());
    tokio::spawn(serve(listener, state, async {
        let _ = shutdown_rx.await;
    }));

    TestServer {
        addr,
        registry,
        dispatcher,
        _shutdown: shutdown_tx,
    }
}

async fn wait_for_subscribers(registry: &SubscriberRegistry, expected: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while registry.len() != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("expected {expected} subscribers, have {}", registry.len()));
}

fn state(clock: i32) -> DashboardState {
    DashboardState {
        hero_name: "npc_dota_hero_puck".to_string(),
        clock_time: clock,
        clock_display: "10:10".to_string(),
        strategy_text: "ALERT: Power rune (min 10) + catapult".to_string(),
        strategy_warn: true,
        health_percent: 25,
        mana_percent: 80,
        gold: 200,
        last_hits: 40,
        denies: 6,
        buyback_status: BuybackStatus::InsufficientFunds,
        buyback_missing: 300,
        gpm: 410,
        kda: "1/2/3".to_string(),
        wand_alert: true,
        tp_alert: true,
        hp_regen_alert: false,
        mana_regen_alert: false,
    }
}

#[tokio::test]
async fn test_subscriber_receives_dispatched_state() {
    let server = start(4).await;
    let url = format!("ws://{}/ws", server.addr);
    let (mut client, _) = tokio_tungstenite::connect_async(url).await.unwrap();
    wait_for_subscribers(&server.registry, 1).await;

    server.dispatcher.submit(state(610)).unwrap();

    let frame = tokio::time::timeout(Duration::from_secs(2), client.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let Message::Text(text) = frame else {
        panic!("expected text frame, got {frame:?}");
    };
    let received: DashboardState = serde_json::from_str(&text).unwrap();
    assert_eq!(received, state(610));
}

#[tokio::test]
async fn test_connection_limit_rejects_upgrade() {
    let server = start(1).await;
    let url = format!("ws://{}/ws", server.addr);

    let (_first, _) = tokio_tungstenite::connect_async(url.clone()).await.unwrap();
    wait_for_subscribers(&server.registry, 1).await;

    match tokio_tungstenite::connect_async(url).await {
        Err(tungstenite::Error::Http(response)) => assert_eq!(response.status(), 503),
        Err(e) => panic!("expected 503, got {e}"),
        Ok(_) => panic!("expected 503, upgrade was accepted"),
    }
    assert_eq!(server.registry.len(), 1);
}

#[tokio::test]
async fn test_client_close_deregisters() {
    let server = start(4).await;
    let url = format!("ws://{}/ws", server.addr);

    let (mut client, _) = tokio_tungstenite::connect_async(url).await.unwrap();
    wait_for_subscribers(&server.registry, 1).await;

    // Keepalive traffic does not affect membership
    client.send(Message::Ping(vec![1, 2, 3].into())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(server.registry.len(), 1);

    client.close(None).await.unwrap();
    wait_for_subscribers(&server.registry, 0).await;
}

#[tokio::test]
async fn test_dropped_client_removed_on_send() {
    let server = start(4).await;
    let url = format!("ws://{}/ws", server.addr);

    let (dropped, _) = tokio_tungstenite::connect_async(url.clone()).await.unwrap();
    let (mut alive, _) = tokio_tungstenite::connect_async(url).await.unwrap();
    wait_for_subscribers(&server.registry, 2).await;

    drop(dropped);
    for clock in 0..5 {
        server.dispatcher.submit(state(clock)).unwrap();
    }

    // The surviving viewer still gets every state, in order
    for clock in 0..5 {
        let frame = tokio::time::timeout(Duration::from_secs(2), alive.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        let received: DashboardState = serde_json::from_str(frame.to_text().unwrap()).unwrap();
        assert_eq!(received.clock_time, clock);
    }
    wait_for_subscribers(&server.registry, 1).await;
}
