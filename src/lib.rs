//! Console status display for a ball-drop tracker's real-time event feed.
//!
//! Connects to the tracker backend over WebSocket, mirrors each
//! `status_change` event into a three-way display state, counts successful
//! entries, and celebrates each one with a short-lived particle burst.

/// Particle burst generation and display-window scheduling.
pub mod animation;
/// Command-line argument definitions.
pub mod cli;
/// WebSocket client implementation and runtime loop.
pub mod client;
/// Runtime configuration model.
pub mod config;
/// Error types used across the crate.
pub mod error;
/// Event bus messages between client and UI.
pub mod events;
/// Terminal output formatters.
pub mod formatter;
/// Metrics setup and global counters.
pub mod monitoring;
/// Status state machine and connection status.
pub mod status;
/// Tracing/logging initialization.
pub mod tracing_setup;
/// Wire-format data models for the tracker feed.
pub mod types;
/// UI controller and presentation loop.
pub mod ui;

/// Primary crate error type.
pub use error::TrackerError;
