use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("WebSocket connection error: {0}")]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Connection attempt timed out")]
    Timeout,

    #[error("Event channel closed: {0}")]
    EventSendError(String),

    #[error("Metrics server error: {0}")]
    MetricsError(String),
}
