// file: src/config.rs
// description: runtime configuration assembled from CLI arguments

use crate::cli::Args;
use crate::error::TrackerError;
use anyhow::Result;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub websocket: WebSocketConfig,
    pub animation: AnimationConfig,
    pub metrics: MetricsConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone)]
pub struct WebSocketConfig {
    pub url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub particle_count: usize,
    pub display_window: Duration,
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colored: bool,
    pub quiet: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            display_window: Duration::from_secs(3),
        }
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        let url = Url::parse(&args.url).map_err(TrackerError::UrlError)?;

        Ok(Config {
            websocket: WebSocketConfig {
                url,
                timeout: Duration::from_secs(args.timeout),
            },
            animation: AnimationConfig {
                particle_count: args.burst_particles,
                display_window: Duration::from_secs(args.burst_window),
            },
            metrics: MetricsConfig {
                enabled: args.metrics,
                port: args.metrics_port,
            },
            ui: UiConfig {
                colored: !args.no_color,
                quiet: args.quiet,
            },
        })
    }
}
