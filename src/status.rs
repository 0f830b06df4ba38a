// file: src/status.rs
// description: status state machine owning display state, confidence, and the success counter

use crate::animation::ParticleAnimator;
use crate::types::{StatusChange, StatusKind};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Up/down state of the tracker event channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
}

/// The three-way status shown to the user. Transitions are driven solely by
/// inbound events, never by a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Waiting,
    Entry,
    Exit,
}

/// Icon family the renderer picks a glyph from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Check,
    Alert,
    Spinner,
}

impl DisplayState {
    pub fn from_kind(kind: StatusKind) -> Self {
        match kind {
            StatusKind::Entry => DisplayState::Entry,
            StatusKind::Exit => DisplayState::Exit,
            // Unrecognized kinds settle back to the idle screen rather than
            // being rejected.
            StatusKind::Waiting | StatusKind::Unknown => DisplayState::Waiting,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DisplayState::Entry => "DROP DETECTED",
            DisplayState::Exit => "SYSTEM CLEAR",
            DisplayState::Waiting => "SYSTEM ACTIVE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DisplayState::Entry => "TARGET ACQUIRED - PERFECT SHOT!",
            DisplayState::Exit => "Ready for next attempt.",
            DisplayState::Waiting => "Monitoring target zone.",
        }
    }

    pub fn icon(&self) -> IconKind {
        match self {
            DisplayState::Entry => IconKind::Check,
            DisplayState::Exit => IconKind::Alert,
            DisplayState::Waiting => IconKind::Spinner,
        }
    }
}

/// Outcome of applying one inbound status change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: DisplayState,
    pub confidence: f64,
    pub successes: u64,
    pub entered: bool,
}

/// Single authoritative owner of the display state, the last reported
/// confidence, and the success counter. Nothing else mutates them.
#[derive(Debug)]
pub struct StatusTracker {
    connection: ConnectionStatus,
    display: DisplayState,
    confidence: f64,
    successes: u64,
    animator: ParticleAnimator,
}

impl StatusTracker {
    pub fn new(animator: ParticleAnimator) -> Self {
        Self {
            connection: ConnectionStatus::Disconnected,
            display: DisplayState::Waiting,
            confidence: 0.0,
            successes: 0,
            animator,
        }
    }

    /// Applies one inbound status change. Every change overwrites the stored
    /// confidence; a transition into Entry additionally bumps the success
    /// counter and starts a particle burst.
    ///
    /// The feed is at-least-once and carries no dedup key, so a repeated
    /// `entry` counts and celebrates again.
    pub fn apply(&mut self, change: &StatusChange) -> Transition {
        self.display = DisplayState::from_kind(change.status);
        self.confidence = change.confidence;
        let entered = self.display == DisplayState::Entry;
        if entered {
            self.successes += 1;
            self.animator.trigger();
        }
        Transition {
            state: self.display,
            confidence: self.confidence,
            successes: self.successes,
            entered,
        }
    }

    pub fn mark_connected(&mut self) {
        self.connection = ConnectionStatus::Connected;
    }

    pub fn mark_disconnected(&mut self) {
        self.connection = ConnectionStatus::Disconnected;
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }
}

pub type SharedStatus = Arc<Mutex<StatusTracker>>;
