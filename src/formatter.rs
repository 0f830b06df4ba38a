// file: src/formatter.rs
// description: ANSI formatting for status lines, the score card, and burst rendering

use crate::animation::ParticleBatch;
use crate::status::{DisplayState, IconKind};
use chrono::Local;

// ANSI color codes
pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const WHITE: &'static str = "\x1b[37m";

    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_BLUE: &'static str = "\x1b[94m";
    pub const BRIGHT_MAGENTA: &'static str = "\x1b[95m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
}

// How many particles of a burst fit on one console row.
const BURST_ROW_WIDTH: usize = 60;

/// Maps a palette hex color to the closest ANSI escape.
fn ansi_for(color: &str) -> &'static str {
    match color {
        "#FF00FF" => Colors::BRIGHT_MAGENTA,
        "#00FFFF" => Colors::BRIGHT_CYAN,
        "#FF3333" => Colors::BRIGHT_RED,
        "#33FF33" => Colors::BRIGHT_GREEN,
        "#FFFF00" => Colors::BRIGHT_YELLOW,
        _ => Colors::WHITE,
    }
}

pub struct StatusFormatter {
    colored: bool,
    quiet: bool,
}

impl StatusFormatter {
    pub fn new(colored: bool, quiet: bool) -> Self {
        Self { colored, quiet }
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.colored {
            code
        } else {
            ""
        }
    }

    fn timestamp(&self) -> String {
        Local::now().format("%H:%M:%S%.3f").to_string()
    }

    pub fn print_banner(&self) {
        if self.quiet {
            return;
        }
        println!();
        println!(
            "{}{}=== 2077 BALLISTIC TRACKER v{} ==={}",
            self.paint(Colors::BOLD),
            self.paint(Colors::BRIGHT_CYAN),
            env!("CARGO_PKG_VERSION"),
            self.paint(Colors::RESET)
        );
        println!();
    }

    pub fn format_connection(&self, status: &str, message: &str) -> String {
        let color = match status {
            "CONNECTING" => Colors::BRIGHT_YELLOW,
            "ONLINE" => Colors::BRIGHT_GREEN,
            "OFFLINE" => Colors::BRIGHT_RED,
            "STOPPING" => Colors::BRIGHT_MAGENTA,
            _ => Colors::WHITE,
        };
        format!(
            "{}{}[SYSTEM {}]{} {}",
            self.paint(Colors::BOLD),
            self.paint(color),
            status,
            self.paint(Colors::RESET),
            message
        )
    }

    pub fn print_connection(&self, status: &str, message: &str) {
        if self.quiet && status == "CONNECTING" {
            return;
        }
        println!("{}", self.format_connection(status, message));
    }

    pub fn format_status(&self, state: DisplayState, confidence: f64) -> String {
        let (glyph, color) = match state.icon() {
            IconKind::Check => ("+", Colors::BRIGHT_GREEN),
            IconKind::Alert => ("!", Colors::BRIGHT_BLUE),
            IconKind::Spinner => ("~", Colors::BRIGHT_YELLOW),
        };
        format!(
            "{}{} {}{}[{}]{} {} {}(confidence {:.2}){}",
            self.paint(Colors::DIM),
            self.timestamp(),
            self.paint(Colors::BOLD),
            self.paint(color),
            state.title(),
            self.paint(Colors::RESET),
            glyph,
            self.paint(Colors::DIM),
            confidence,
            self.paint(Colors::RESET)
        )
    }

    pub fn print_status(&self, state: DisplayState, confidence: f64) {
        println!("{}", self.format_status(state, confidence));
        if !self.quiet {
            println!(
                "{}  {}{}",
                self.paint(Colors::DIM),
                state.description(),
                self.paint(Colors::RESET)
            );
        }
    }

    pub fn format_score(&self, successes: u64) -> String {
        format!(
            "{}{}  {} ALL-TIME SUCCESSFUL ENTRIES{}",
            self.paint(Colors::BOLD),
            self.paint(Colors::BRIGHT_MAGENTA),
            successes,
            self.paint(Colors::RESET)
        )
    }

    pub fn print_score(&self, successes: u64) {
        if self.quiet {
            return;
        }
        println!("{}", self.format_score(successes));
    }

    /// Renders a burst as a single row of colored confetti glyphs. The
    /// console shows a sample of the batch; the full batch stays queryable
    /// on the animator for its display window.
    pub fn format_burst(&self, batch: &ParticleBatch) -> String {
        let mut row = String::new();
        for particle in batch.particles.iter().take(BURST_ROW_WIDTH) {
            row.push_str(self.paint(ansi_for(particle.color)));
            row.push('*');
        }
        row.push_str(self.paint(Colors::RESET));
        format!("  {} ({} particles)", row, batch.len())
    }

    pub fn print_burst(&self, batch: &ParticleBatch) {
        if self.quiet {
            return;
        }
        println!("{}", self.format_burst(batch));
    }

    pub fn print_error(&self, message: &str) {
        println!(
            "{}{}[ERROR]{} {}{}{}",
            self.paint(Colors::BOLD),
            self.paint(Colors::BRIGHT_RED),
            self.paint(Colors::RESET),
            self.paint(Colors::RED),
            message,
            self.paint(Colors::RESET)
        );
    }
}
