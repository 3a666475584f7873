//! View and Control Routes
//!
//! The controls a UI would bind to its widgets: region selector, threshold
//! slider, live-mode switch and theme toggle.

use axum::{extract::State, Json};
use risk_view::RegionFilter;
use serde::Deserialize;
use std::sync::Arc;

use crate::store::Snapshot;
use crate::{AppState, DashboardError};

/// Partial view update; omitted fields keep their value
#[derive(Debug, Deserialize)]
pub struct ViewUpdate {
    pub region: Option<RegionFilter>,
    pub crack_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LiveUpdate {
    pub enabled: bool,
}

/// Get the current snapshot
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.store.read().await.snapshot())
}

/// Change region filter and/or crack threshold
pub async fn put_view(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ViewUpdate>,
) -> Result<Json<Snapshot>, DashboardError> {
    let mut store = state.store.write().await;

    let mut params = store.params();
    if let Some(region) = update.region {
        params.region_filter = region;
    }
    if let Some(threshold) = update.crack_threshold {
        params.crack_threshold = threshold;
    }
    store.set_view(params)?;

    Ok(Json(store.snapshot()))
}

/// Switch live refresh on or off
pub async fn put_live(
    State(state): State<Arc<AppState>>,
    Json(update): Json<LiveUpdate>,
) -> Json<Snapshot> {
    let mut store = state.store.write().await;
    store.set_live_mode(update.enabled);
    Json(store.snapshot())
}

/// Flip between light and dark theme
pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    let mut store = state.store.write().await;
    store.toggle_theme();
    Json(store.snapshot())
}
