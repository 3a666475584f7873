//! Dashboard State Store
//!
//! Single owner of the displayed data and the user's view parameters. Every
//! mutation re-evaluates the risk view and publishes a fresh [`Snapshot`] on a
//! `watch` channel, so subscribers always see the latest complete view.

use crate::DashboardError;
use history_loader::HistoryLoader;
use reading_model::ReadingBatch;
use risk_view::{evaluate, DashboardSummary, RegionFilter, RiskThresholds, ViewParams};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

/// Store shared between the API, the refresh loop and the display
pub type SharedStore = Arc<RwLock<DashboardStore>>;

/// UI colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Where the displayed readings came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Latest synthetic batch
    Generated,
    /// Uploaded history file
    History { file_name: String },
}

/// Derived view published after every change
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Increments on every publish
    pub revision: u64,
    pub source: DataSource,
    pub params: ViewParams,
    pub theme: Theme,
    pub live_mode: bool,
    /// Readings in the displayed batch before filtering
    pub reading_count: usize,
    pub summary: DashboardSummary,
}

struct History {
    file_name: String,
    batch: ReadingBatch,
}

/// Owned dashboard state with explicit change notification
pub struct DashboardStore {
    /// Most recent generated batch
    baseline: ReadingBatch,
    /// Uploaded batch shown instead of the baseline
    history: Option<History>,
    params: ViewParams,
    thresholds: RiskThresholds,
    theme: Theme,
    live_mode: bool,
    loader: HistoryLoader,
    revision: u64,
    tx: watch::Sender<Snapshot>,
}

impl DashboardStore {
    /// Create a store and publish the initial snapshot
    pub fn new(
        baseline: ReadingBatch,
        params: ViewParams,
        thresholds: RiskThresholds,
        live_mode: bool,
    ) -> Self {
        let initial = Snapshot {
            revision: 0,
            source: DataSource::Generated,
            params,
            theme: Theme::default(),
            live_mode,
            reading_count: baseline.len(),
            summary: evaluate(&baseline, &params, &thresholds),
        };
        let (tx, _rx) = watch::channel(initial);

        Self {
            baseline,
            history: None,
            params,
            thresholds,
            theme: Theme::default(),
            live_mode,
            loader: HistoryLoader::default(),
            revision: 0,
            tx,
        }
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Most recently published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Batch currently on display
    pub fn displayed(&self) -> &ReadingBatch {
        self.history.as_ref().map_or(&self.baseline, |h| &h.batch)
    }

    /// Latest generated batch, regardless of any uploaded history
    pub fn baseline(&self) -> &ReadingBatch {
        &self.baseline
    }

    pub fn params(&self) -> ViewParams {
        self.params
    }

    pub fn live_mode(&self) -> bool {
        self.live_mode
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn source(&self) -> DataSource {
        match &self.history {
            Some(h) => DataSource::History {
                file_name: h.file_name.clone(),
            },
            None => DataSource::Generated,
        }
    }

    fn publish(&mut self) {
        self.revision += 1;
        let displayed = self.displayed();
        let summary = evaluate(displayed, &self.params, &self.thresholds);

        metrics::gauge!("cathedral_high_risk_readings").set(summary.high_risk_count as f64);
        if summary.alert {
            warn!(
                "Latest reading is high-risk ({} high-risk of {} shown)",
                summary.high_risk_count, summary.filtered_len
            );
        }

        let snapshot = Snapshot {
            revision: self.revision,
            source: self.source(),
            params: self.params,
            theme: self.theme,
            live_mode: self.live_mode,
            reading_count: displayed.len(),
            summary,
        };
        self.tx.send_replace(snapshot);
    }

    /// Replace the generated baseline with a new poll
    pub fn replace_baseline(&mut self, batch: ReadingBatch) {
        self.baseline = batch;
        self.publish();
    }

    /// Replace both view parameters at once
    pub fn set_view(&mut self, params: ViewParams) -> Result<(), DashboardError> {
        self.params = ViewParams::new(params.region_filter, params.crack_threshold)?;
        self.publish();
        Ok(())
    }

    pub fn set_region_filter(&mut self, filter: RegionFilter) {
        self.params.region_filter = filter;
        self.publish();
    }

    pub fn set_crack_threshold(&mut self, threshold: f64) -> Result<(), DashboardError> {
        self.params = ViewParams::new(self.params.region_filter, threshold)?;
        self.publish();
        Ok(())
    }

    pub fn set_live_mode(&mut self, enabled: bool) {
        info!("Live mode {}", if enabled { "enabled" } else { "disabled" });
        self.live_mode = enabled;
        self.publish();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.publish();
        self.theme
    }

    /// Show an uploaded file instead of the baseline.
    ///
    /// On error nothing changes and no snapshot is published.
    pub fn load_history(&mut self, file_name: &str, data: &[u8]) -> Result<usize, DashboardError> {
        let batch = match self.loader.parse(file_name, data) {
            Ok(batch) => batch,
            Err(e) => {
                metrics::counter!("cathedral_history_uploads_total", "result" => "rejected").increment(1);
                warn!("History upload {} rejected: {}", file_name, e);
                return Err(e.into());
            }
        };
        metrics::counter!("cathedral_history_uploads_total", "result" => "accepted").increment(1);

        let count = batch.len();
        self.history = Some(History {
            file_name: file_name.to_string(),
            batch,
        });
        self.publish();
        Ok(count)
    }

    /// Go back to showing the generated baseline
    pub fn clear_history(&mut self) -> bool {
        let had_history = self.history.take().is_some();
        if had_history {
            self.publish();
        }
        had_history
    }
}
