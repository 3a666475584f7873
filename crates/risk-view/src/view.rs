//! Filter/Aggregate Evaluation

use crate::{RegionStats, RiskThresholds, StatusCounts, ViewParams};
use reading_model::{Reading, ReadingBatch};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Everything the dashboard shows for one batch and one set of parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Readings passing the filters
    pub filtered_len: usize,
    /// Distinct regions among filtered readings
    pub regions_monitored: usize,
    /// Filtered readings exceeding any risk threshold
    pub high_risk_count: usize,
    /// Filtered readings with status Critical
    pub critical_count: usize,
    /// Latest filtered reading is high-risk
    pub alert: bool,
    /// Latest filtered reading, if any
    pub latest: Option<Reading>,
    /// Per-region statistics for charts
    pub region_stats: Vec<RegionStats>,
    /// Repair status distribution
    pub status_counts: StatusCounts,
}

/// Readings that pass the region and threshold filters, batch order
pub fn filter_readings<'a>(batch: &'a ReadingBatch, params: &ViewParams) -> Vec<&'a Reading> {
    batch.iter().filter(|r| params.admits(r)).collect()
}

/// Evaluate the view. Pure: identical inputs give identical output.
pub fn evaluate(
    batch: &ReadingBatch,
    params: &ViewParams,
    thresholds: &RiskThresholds,
) -> DashboardSummary {
    let filtered = filter_readings(batch, params);

    let regions_monitored = filtered.iter().map(|r| r.region).collect::<HashSet<_>>().len();
    let high_risk_count = filtered.iter().filter(|r| thresholds.is_high_risk(r)).count();
    let status_counts = StatusCounts::tally(&filtered);

    // first of equal timestamps wins
    let latest = filtered
        .iter()
        .copied()
        .reduce(|best, r| if r.timestamp > best.timestamp { r } else { best });
    let alert = latest.map_or(false, |r| thresholds.is_high_risk(r));

    debug!(
        "Evaluated {} of {} readings: {} high-risk, alert={}",
        filtered.len(),
        batch.len(),
        high_risk_count,
        alert
    );

    DashboardSummary {
        filtered_len: filtered.len(),
        regions_monitored,
        high_risk_count,
        critical_count: status_counts.critical,
        alert,
        latest: latest.cloned(),
        region_stats: RegionStats::per_region(&filtered),
        status_counts,
    }
}
