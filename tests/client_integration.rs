//! End-to-end tests driving the client against an in-process WebSocket feed.

use futures_util::{SinkExt, StreamExt};
use rs_balltracker::{
    animation::ParticleAnimator,
    client::TrackerWebSocketClient,
    config::{AnimationConfig, Config, MetricsConfig, UiConfig, WebSocketConfig},
    events::{create_event_channel, ClientEvent, EventReceiver},
    status::{ConnectionStatus, DisplayState, SharedStatus, StatusTracker},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

/// Serves one WebSocket session: sends the given frames, then closes cleanly.
async fn spawn_feed(frames: Vec<String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        for frame in frames {
            ws.send(Message::text(frame)).await.unwrap();
        }
        let _ = ws.close(None).await;
        // Drive the close handshake to completion.
        while let Some(msg) = ws.next().await {
            if msg.is_err() {
                break;
            }
        }
    });
    addr
}

fn test_config(addr: SocketAddr) -> Arc<Config> {
    Arc::new(Config {
        websocket: WebSocketConfig {
            url: Url::parse(&format!("ws://{}", addr)).unwrap(),
            timeout: Duration::from_secs(5),
        },
        animation: AnimationConfig::default(),
        metrics: MetricsConfig {
            enabled: false,
            port: 0,
        },
        ui: UiConfig {
            colored: false,
            quiet: true,
        },
    })
}

fn status_change(status: &str, confidence: f64) -> String {
    format!(
        r#"{{"type":"status_change","status":"{}","confidence":{}}}"#,
        status, confidence
    )
}

struct Harness {
    client: TrackerWebSocketClient,
    state: SharedStatus,
    animator: ParticleAnimator,
    events: EventReceiver,
}

fn harness(addr: SocketAddr) -> Harness {
    let (event_sender, events) = create_event_channel();
    let animator = ParticleAnimator::new(AnimationConfig::default());
    let state: SharedStatus = Arc::new(Mutex::new(StatusTracker::new(animator.clone())));
    let client = TrackerWebSocketClient::new(test_config(addr), event_sender, Arc::clone(&state));
    Harness {
        client,
        state,
        animator,
        events,
    }
}

async fn drain(mut events: EventReceiver) -> Vec<ClientEvent> {
    let mut collected = Vec::new();
    while let Some(event) = events.recv().await {
        collected.push(event);
    }
    collected
}

#[tokio::test]
async fn entry_then_exit_scenario() {
    let addr = spawn_feed(vec![
        status_change("entry", 0.9),
        status_change("exit", 0.1),
    ])
    .await;
    let mut h = harness(addr);

    h.client.run().await.expect("session should end cleanly");

    {
        let state = h.state.lock().await;
        assert_eq!(state.display(), DisplayState::Exit);
        assert_eq!(state.successes(), 1);
        assert_eq!(state.confidence(), 0.1);
        assert_eq!(state.connection(), ConnectionStatus::Disconnected);
    }

    // The burst outlives the short session; its window has not elapsed yet.
    assert_eq!(h.animator.snapshot().expect("burst still live").len(), 150);

    drop(h.client);
    let events = drain(h.events).await;

    let changes: Vec<(DisplayState, f64, u64)> = events
        .iter()
        .filter_map(|e| match e {
            ClientEvent::StatusChanged {
                state,
                confidence,
                successes,
            } => Some((*state, *confidence, *successes)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![(DisplayState::Entry, 0.9, 1), (DisplayState::Exit, 0.1, 1)]
    );

    assert!(events
        .iter()
        .any(|e| matches!(e, ClientEvent::BurstStarted { particles: 150 })));
    assert!(events.iter().any(|e| matches!(e, ClientEvent::Connected { .. })));
    assert!(events.iter().any(|e| matches!(e, ClientEvent::Disconnected)));
}

#[tokio::test]
async fn malformed_payload_is_dropped_without_state_change() {
    let addr = spawn_feed(vec![
        status_change("entry", 0.9),
        "{not json".to_string(),
    ])
    .await;
    let mut h = harness(addr);

    h.client.run().await.expect("malformed payloads must not kill the session");

    {
        let state = h.state.lock().await;
        assert_eq!(state.display(), DisplayState::Entry);
        assert_eq!(state.successes(), 1);
        assert_eq!(state.confidence(), 0.9);
    }

    drop(h.client);
    let events = drain(h.events).await;
    assert!(events
        .iter()
        .any(|e| matches!(e, ClientEvent::MalformedPayload { .. })));
}

#[tokio::test]
async fn unrelated_message_types_are_ignored() {
    let addr = spawn_feed(vec![
        r#"{"type":"heartbeat","uptime":42}"#.to_string(),
        status_change("waiting", 0.5),
    ])
    .await;
    let mut h = harness(addr);

    h.client.run().await.unwrap();

    {
        let state = h.state.lock().await;
        assert_eq!(state.display(), DisplayState::Waiting);
        assert_eq!(state.successes(), 0);
        assert_eq!(state.confidence(), 0.5);
    }

    drop(h.client);
    let events = drain(h.events).await;
    assert!(!events
        .iter()
        .any(|e| matches!(e, ClientEvent::MalformedPayload { .. })));
}

#[tokio::test]
async fn unrecognized_status_kind_falls_back_to_waiting() {
    let addr = spawn_feed(vec![
        status_change("entry", 0.9),
        status_change("bounce", 0.4),
    ])
    .await;
    let mut h = harness(addr);

    h.client.run().await.unwrap();

    let state = h.state.lock().await;
    assert_eq!(state.display(), DisplayState::Waiting);
    assert_eq!(state.successes(), 1);
    assert_eq!(state.confidence(), 0.4);
}

#[tokio::test]
async fn reconnected_session_resumes_without_reset() {
    let addr = spawn_feed(vec![status_change("entry", 0.9)]).await;
    let mut h = harness(addr);
    h.client.run().await.unwrap();
    assert_eq!(h.state.lock().await.successes(), 1);

    // A second session against the same state machine keeps counting.
    let addr = spawn_feed(vec![status_change("entry", 0.8)]).await;
    let (event_sender, events) = create_event_channel();
    let mut client =
        TrackerWebSocketClient::new(test_config(addr), event_sender, Arc::clone(&h.state));
    client.run().await.unwrap();

    {
        let state = h.state.lock().await;
        assert_eq!(state.successes(), 2);
        assert_eq!(state.connection(), ConnectionStatus::Disconnected);
    }
    drop(client);
    drop(events);
}

#[tokio::test]
async fn connect_failure_reports_and_leaves_disconnected() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut h = harness(addr);
    let result = h.client.run().await;
    assert!(result.is_err());

    assert_eq!(
        h.state.lock().await.connection(),
        ConnectionStatus::Disconnected
    );

    drop(h.client);
    let events = drain(h.events).await;
    assert!(events
        .iter()
        .any(|e| matches!(e, ClientEvent::ConnectionFailed(_))));
    assert!(!events.iter().any(|e| matches!(e, ClientEvent::Connected { .. })));
}
