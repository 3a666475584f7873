//! Dashboard Settings
//!
//! Read from an optional TOML file, then overridden by `CATHEDRAL_*`
//! environment variables (`CATHEDRAL_THRESHOLDS__STRESS=0.75` for nested keys).

use crate::DashboardError;
use reading_generator::{DEFAULT_BATCH_SIZE, DEFAULT_OUTPUT_PATH};
use risk_view::{RegionFilter, RiskThresholds, ViewParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "cathedral-monitor.toml";

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// HTTP listen address
    pub bind_addr: String,
    /// Live refresh period (seconds)
    pub refresh_interval_secs: u64,
    /// Readings generated per refresh
    pub batch_size: usize,
    /// JSON file seeded from at startup and rewritten on refresh
    pub output_path: PathBuf,
    /// Write every generated batch to `output_path`
    pub persist_generated: bool,
    /// Start with live refresh enabled
    pub live_mode: bool,
    /// Initial crack-sensitivity threshold
    pub crack_threshold: f64,
    /// Initial region filter
    pub region_filter: RegionFilter,
    /// High-risk limits
    pub thresholds: RiskThresholds,
    /// Fixed generator seed (random when unset)
    pub seed: Option<u64>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            refresh_interval_secs: 5,
            batch_size: DEFAULT_BATCH_SIZE,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            persist_generated: true,
            live_mode: true,
            crack_threshold: 0.5,
            region_filter: RegionFilter::All,
            thresholds: RiskThresholds::default(),
            seed: None,
        }
    }
}

impl DashboardSettings {
    /// Load settings from `path` (optional) and the environment
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("CATHEDRAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Initial view parameters, validated
    pub fn view_params(&self) -> Result<ViewParams, DashboardError> {
        Ok(ViewParams::new(self.region_filter, self.crack_threshold)?)
    }

    /// Refresh period, never shorter than one second
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}
