//! Cathedral Monitor - Main Entry Point

use dashboard::{init_logging, run, DashboardSettings, SETTINGS_FILE};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Cathedral Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = DashboardSettings::load(Path::new(SETTINGS_FILE))?;
    info!("Loaded settings: {:?}", settings);

    let prometheus = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder unavailable: {}", e);
            None
        }
    };

    run(settings, prometheus).await?;

    Ok(())
}
