// file: src/types.rs
// description: type definitions for the ball tracker WebSocket event feed

use serde::{Deserialize, Deserializer};

// Helper for decoding status kinds permissively: an unrecognized kind is a
// valid message, not a parse failure.
mod permissive_kind {
    use super::*;
    pub fn deserialize<'de, D>(deserializer: D) -> Result<StatusKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "entry" => StatusKind::Entry,
            "exit" => StatusKind::Exit,
            "waiting" => StatusKind::Waiting,
            _ => StatusKind::Unknown,
        })
    }
}

/// Inbound messages, discriminated by the `type` field. The tracker backend
/// shares the channel with message types this client does not care about;
/// those decode as [`WireMessage::Unsupported`] and are skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMessage {
    StatusChange(StatusChange),
    #[serde(other)]
    Unsupported,
}

/// A single status transition reported by the tracker.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusChange {
    #[serde(deserialize_with = "permissive_kind::deserialize")]
    pub status: StatusKind,
    /// Detector confidence for this transition, 0.0 to 1.0. Informational
    /// only, never used to gate a transition.
    #[serde(default)]
    pub confidence: f64,
}

/// Status kind as reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Entry,
    Exit,
    Waiting,
    /// Anything the feed reports that this client does not recognize.
    Unknown,
}
