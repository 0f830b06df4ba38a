use anyhow::Result;
use clap::Parser;
use rs_balltracker::{
    animation::ParticleAnimator, cli::Args, client::TrackerWebSocketClient, config::Config,
    events::create_event_channel, formatter::StatusFormatter, monitoring::setup_metrics,
    status::StatusTracker, tracing_setup::setup_tracing, ui::UIController,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_tracing(&args.log_level, args.json_logs)?;

    info!(
        "Starting ball tracker console v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = Arc::new(Config::from_args(&args)?);

    if config.metrics.enabled {
        setup_metrics(config.metrics.port).await?;
        info!("Metrics server started on port {}", config.metrics.port);
    }

    let (event_sender, event_receiver) = create_event_channel();
    let animator = ParticleAnimator::new(config.animation.clone());
    let state = Arc::new(Mutex::new(StatusTracker::new(animator.clone())));

    let formatter = StatusFormatter::new(config.ui.colored, config.ui.quiet);
    let mut ui = UIController::new(event_receiver, formatter, animator);
    let ui_task = tokio::spawn(async move { ui.run().await });

    let mut client = TrackerWebSocketClient::new(config, event_sender, state);
    if let Err(e) = client.run().await {
        error!("WebSocket client error: {}", e);
    }

    // Drop the sender so the UI loop drains and exits.
    drop(client);
    let _ = ui_task.await;

    info!("Client stopped");
    Ok(())
}
