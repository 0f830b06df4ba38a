use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "rs-balltracker",
    about = "console status display for ball-drop tracker events over websocket",
    version
)]
pub struct Args {
    /// WebSocket endpoint of the tracker event feed
    #[arg(short, long, default_value = "ws://localhost:8765")]
    pub url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,

    /// Enable metrics server
    #[arg(long)]
    pub metrics: bool,

    /// Metrics server port
    #[arg(long, default_value = "9090")]
    pub metrics_port: u16,

    /// Connection timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Number of particles per celebration burst
    #[arg(long, default_value = "150")]
    pub burst_particles: usize,

    /// Seconds a burst stays on screen before it clears
    #[arg(long, default_value = "3")]
    pub burst_window: u64,

    /// Disable colored output (useful for piping to files)
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode - status transitions only
    #[arg(long)]
    pub quiet: bool,
}
