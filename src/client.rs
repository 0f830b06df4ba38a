// file: src/client.rs
// description: WebSocket client consuming the ball tracker status feed

use crate::{
    config::Config,
    error::TrackerError,
    events::{ClientEvent, EventSender},
    monitoring,
    status::SharedStatus,
    types::WireMessage,
};
use anyhow::Result;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Owns one logical connection to the tracker feed.
///
/// There is deliberately no reconnect loop: when the channel drops, the
/// status flips to offline and `run` returns. Calling `run` again opens a
/// fresh session against the same state machine, so the success counter
/// survives a reconnect. A production build would add bounded backoff here.
pub struct TrackerWebSocketClient {
    pub config: Arc<Config>,
    event_sender: EventSender,
    pub state: SharedStatus,
}

impl TrackerWebSocketClient {
    pub fn new(config: Arc<Config>, event_sender: EventSender, state: SharedStatus) -> Self {
        Self {
            config,
            event_sender,
            state,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let _ = self.send_event(ClientEvent::Starting).await;

        let result = self.connect_and_run().await;

        // Whatever ended the session, the channel is gone now.
        {
            let mut state = self.state.lock().await;
            state.mark_disconnected();
        }
        monitoring::CONNECTED_GAUGE.set(0.0);
        let _ = self.send_event(ClientEvent::Disconnected).await;
        let _ = self.send_event(ClientEvent::Stopping).await;

        result
    }

    async fn connect_and_run(&mut self) -> Result<()> {
        let url = self.config.websocket.url.clone();
        let _ = self
            .send_event(ClientEvent::Connecting {
                url: url.to_string(),
            })
            .await;

        let connect = connect_async(url.as_str());
        let (ws_stream, _) = match tokio::time::timeout(self.config.websocket.timeout, connect).await
        {
            Ok(Ok(connected)) => connected,
            Ok(Err(e)) => {
                error!("Failed to connect to WebSocket: {}", e);
                let _ = self
                    .send_event(ClientEvent::ConnectionFailed(e.to_string()))
                    .await;
                return Err(TrackerError::WebSocketError(e).into());
            }
            Err(_) => {
                error!("Connection attempt to {} timed out", url);
                let _ = self
                    .send_event(ClientEvent::ConnectionFailed("timed out".to_string()))
                    .await;
                return Err(TrackerError::Timeout.into());
            }
        };

        info!("WebSocket connection established to {}", url);

        let connection_id = uuid::Uuid::new_v4().to_string();
        {
            let mut state = self.state.lock().await;
            state.mark_connected();
        }
        monitoring::CONNECTED_GAUGE.set(1.0);
        let _ = self
            .send_event(ClientEvent::Connected { connection_id })
            .await;

        self.handle_message_stream(ws_stream).await
    }

    async fn handle_message_stream(&mut self, mut stream: WsStream) -> Result<()> {
        info!("Starting message handling loop");

        while let Some(message) = stream.next().await {
            match message {
                Ok(msg) => self.handle_message(msg).await?,
                // Benign tail of the close handshake.
                Err(tokio_tungstenite::tungstenite::Error::ConnectionClosed) => break,
                Err(e) => {
                    error!("WebSocket stream error: {}", e);
                    return Err(TrackerError::WebSocketError(e).into());
                }
            }
        }

        info!("WebSocket stream ended");
        Ok(())
    }

    async fn handle_message(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Text(text) => {
                trace!("Received text message: {}", text);
                monitoring::MESSAGES_RECEIVED_COUNTER.increment(1);
                let _ = self
                    .send_event(ClientEvent::MessageReceived {
                        raw_message: text.to_string(),
                    })
                    .await;
                self.process_text_message(text.as_str()).await?;
            }
            Message::Binary(data) => {
                warn!("Ignoring binary message of {} bytes", data.len());
            }
            Message::Ping(_) => {
                debug!("Received ping");
            }
            Message::Pong(_) => {
                debug!("Received pong");
            }
            Message::Close(frame) => {
                // The library finishes the close handshake; the stream ends
                // on its own right after.
                info!("Received close frame: {:?}", frame);
            }
            Message::Frame(_) => {
                debug!("Received raw frame");
            }
        }
        Ok(())
    }

    /// Parses one text payload. Malformed payloads are reported and dropped;
    /// they never tear down the connection or touch the state machine.
    async fn process_text_message(&mut self, text: &str) -> Result<()> {
        match serde_json::from_str::<WireMessage>(text) {
            Ok(WireMessage::StatusChange(change)) => {
                monitoring::STATUS_CHANGES_COUNTER.increment(1);
                let transition = {
                    let mut state = self.state.lock().await;
                    state.apply(&change)
                };
                debug!(
                    state = ?transition.state,
                    confidence = transition.confidence,
                    successes = transition.successes,
                    "Applied status change"
                );
                self.send_event(ClientEvent::StatusChanged {
                    state: transition.state,
                    confidence: transition.confidence,
                    successes: transition.successes,
                })
                .await?;
                if transition.entered {
                    monitoring::ENTRIES_COUNTER.increment(1);
                    self.send_event(ClientEvent::BurstStarted {
                        particles: self.config.animation.particle_count,
                    })
                    .await?;
                }
            }
            Ok(WireMessage::Unsupported) => {
                debug!("Ignoring unsupported message type");
            }
            Err(e) => {
                monitoring::MALFORMED_COUNTER.increment(1);
                warn!(
                    "Dropping malformed payload: {}. Message: {}",
                    e,
                    text.chars().take(100).collect::<String>()
                );
                let _ = self
                    .send_event(ClientEvent::MalformedPayload {
                        reason: e.to_string(),
                    })
                    .await;
            }
        }
        Ok(())
    }

    async fn send_event(&self, event: ClientEvent) -> Result<()> {
        self.event_sender
            .send(event)
            .await
            .map_err(|e| TrackerError::EventSendError(e.to_string()).into())
    }
}
