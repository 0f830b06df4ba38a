// file: src/events.rs
// description: event system to decouple client logic from UI presentation

use crate::status::DisplayState;
use tokio::sync::mpsc;

/// Structured events emitted by the client for the presentation layer.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    Starting,
    Connecting { url: String },
    Connected { connection_id: String },
    StatusChanged { state: DisplayState, confidence: f64, successes: u64 },
    BurstStarted { particles: usize },
    MessageReceived { raw_message: String },
    MalformedPayload { reason: String },
    ConnectionFailed(String),
    Disconnected,
    Stopping,
}

// Status changes arrive at human pace; this still absorbs bursts without
// letting a stalled consumer grow memory without bound.
const EVENT_CHANNEL_CAPACITY: usize = 1_024;

pub type EventSender = mpsc::Sender<ClientEvent>;
pub type EventReceiver = mpsc::Receiver<ClientEvent>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}
