//! Risk View
//!
//! Pure filter/aggregate evaluation behind the dashboard: region and crack
//! threshold filtering, high-risk and critical counts, the latest-reading
//! alert, and per-region statistics for the charts.

mod params;
mod stats;
mod view;

pub use params::{RegionFilter, RiskThresholds, ViewParams, CRACK_THRESHOLD_RANGE};
pub use stats::{RegionStats, StatusCounts};
pub use view::{evaluate, filter_readings, DashboardSummary};

use thiserror::Error;

/// Errors parsing view parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// Region filter not "All" and not a known region
    #[error("Unknown region filter: {0}")]
    UnknownRegion(String),

    /// Crack threshold outside the slider range
    #[error("Crack threshold {0} is out of range [0.5, 1.5]")]
    ThresholdOutOfRange(f64),
}
