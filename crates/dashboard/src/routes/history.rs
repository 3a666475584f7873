//! History Upload Routes

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{AppState, DashboardError};

/// Query parameters for the upload endpoint
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Original file name; its extension selects the parser
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub readings: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
}

/// Upload a JSON or CSV history file as the raw request body
pub async fn post_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<UploadResponse>, DashboardError> {
    let readings = state
        .store
        .write()
        .await
        .load_history(&params.filename, &body)?;

    Ok(Json(UploadResponse {
        file_name: params.filename,
        readings,
    }))
}

/// Drop uploaded history and show live telemetry again
pub async fn delete_history(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    let cleared = state.store.write().await.clear_history();
    Json(ClearResponse { cleared })
}
