//! Terminal Display
//!
//! Subscriber that renders each published snapshot as a plain-text panel.

use crate::store::{DataSource, Snapshot};
use reading_model::timestamp::format_timestamp;
use std::fmt::Write;
use tokio::sync::watch;
use tracing::info;

/// Render a snapshot as a text panel
pub fn render(snapshot: &Snapshot) -> String {
    let summary = &snapshot.summary;
    let mut out = String::new();

    let source = match &snapshot.source {
        DataSource::Generated => "live telemetry".to_string(),
        DataSource::History { file_name } => format!("history: {}", file_name),
    };

    let _ = writeln!(
        out,
        "Cathedral Structural Health  [rev {}] [{}] [live: {}] [theme: {:?}]",
        snapshot.revision,
        source,
        if snapshot.live_mode { "on" } else { "off" },
        snapshot.theme
    );
    let _ = writeln!(
        out,
        "Filter: region={} crack>={:.2}  ({} of {} readings)",
        snapshot.params.region_filter,
        snapshot.params.crack_threshold,
        summary.filtered_len,
        snapshot.reading_count
    );
    let _ = writeln!(
        out,
        "Regions monitored: {}  High-risk: {}  Critical alerts: {}",
        summary.regions_monitored, summary.high_risk_count, summary.critical_count
    );

    if let Some(latest) = &summary.latest {
        let marker = if summary.alert { "ALERT" } else { "ok" };
        let _ = writeln!(
            out,
            "Latest [{}]: {} {} crack={:.2} stress={:.2} load={:.2} status={}",
            marker,
            format_timestamp(&latest.timestamp),
            latest.region,
            latest.crack_sensitivity,
            latest.stress_score,
            latest.load_path_risk,
            latest.repair_status
        );
    }

    if !summary.region_stats.is_empty() {
        let _ = writeln!(
            out,
            "{:<10} {:>5} {:>8} {:>8} {:>8} {:>8}",
            "Region", "N", "Stress", "MaxStr", "Crack", "Load"
        );
        for stats in &summary.region_stats {
            let _ = writeln!(
                out,
                "{:<10} {:>5} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
                stats.region.as_str(),
                stats.count,
                stats.mean_stress,
                stats.max_stress,
                stats.mean_crack,
                stats.mean_load_path
            );
        }
    }

    out
}

/// Log every new snapshot until the store is dropped
pub async fn run_display(mut rx: watch::Receiver<Snapshot>) {
    info!("\n{}", render(&rx.borrow_and_update()));

    while rx.changed().await.is_ok() {
        let panel = render(&rx.borrow_and_update());
        info!("\n{}", panel);
    }
}
