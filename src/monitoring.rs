use crate::error::TrackerError;
use anyhow::Result;
use metrics::{counter, gauge, Counter, Gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::{net::SocketAddr, sync::LazyLock};
use tracing::{error, info};

// Global metrics
pub static MESSAGES_RECEIVED_COUNTER: LazyLock<Counter> =
    LazyLock::new(|| counter!("balltracker_messages_received_total"));
pub static STATUS_CHANGES_COUNTER: LazyLock<Counter> =
    LazyLock::new(|| counter!("balltracker_status_changes_total"));
pub static ENTRIES_COUNTER: LazyLock<Counter> =
    LazyLock::new(|| counter!("balltracker_entries_total"));
pub static MALFORMED_COUNTER: LazyLock<Counter> =
    LazyLock::new(|| counter!("balltracker_malformed_payloads_total"));
pub static CONNECTED_GAUGE: LazyLock<Gauge> = LazyLock::new(|| gauge!("balltracker_connected"));

pub async fn setup_metrics(port: u16) -> Result<()> {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    let builder = PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("service", "rs-balltracker")
        .add_global_label("version", env!("CARGO_PKG_VERSION"));

    match builder.install() {
        Ok(_handle) => {
            info!(
                "Prometheus metrics server started on http://{}/metrics",
                addr
            );

            // Initialize metrics with default values
            MESSAGES_RECEIVED_COUNTER.absolute(0);
            STATUS_CHANGES_COUNTER.absolute(0);
            ENTRIES_COUNTER.absolute(0);
            MALFORMED_COUNTER.absolute(0);
            CONNECTED_GAUGE.set(0.0);

            Ok(())
        }
        Err(e) => {
            error!("Failed to start metrics server: {}", e);
            Err(TrackerError::MetricsError(e.to_string()).into())
        }
    }
}
