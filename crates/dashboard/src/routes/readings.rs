//! Reading Routes

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use reading_model::{Reading, ReadingBatch};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Query parameters for readings endpoint
#[derive(Debug, Deserialize)]
pub struct ReadingQuery {
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

/// Response for readings endpoint
#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub data: Vec<Reading>,
    pub meta: ReadingMeta,
}

#[derive(Debug, Serialize)]
pub struct ReadingMeta {
    pub count: usize,
    pub total: usize,
    pub limit: usize,
}

/// Get displayed readings, newest first
pub async fn get_readings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReadingQuery>,
) -> Json<ReadingResponse> {
    let store = state.store.read().await;
    let limit = params.limit.min(1000);
    let displayed = store.displayed();

    let data: Vec<Reading> = displayed.sorted_newest_first().into_iter().take(limit).collect();

    Json(ReadingResponse {
        meta: ReadingMeta {
            count: data.len(),
            total: displayed.len(),
            limit,
        },
        data,
    })
}

/// Export displayed readings as CSV, newest first
pub async fn get_readings_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    let sorted: ReadingBatch = store.displayed().sorted_newest_first().into();

    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"readings.csv\""),
        ],
        history_loader::to_csv(&sorted),
    )
}
