//! Dashboard Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use history_loader::IngestError;
use reading_generator::GeneratorError;
use risk_view::ViewError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the dashboard service
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Bad user-supplied view parameter
    #[error("Invalid parameter: {0}")]
    View(#[from] ViewError),

    /// Uploaded history could not be used
    #[error("History upload rejected: {0}")]
    Ingest(#[from] IngestError),

    /// Generated batch could not be persisted
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Settings file or environment is invalid
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    /// Socket or file failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    fn status(&self) -> StatusCode {
        match self {
            DashboardError::View(_) => StatusCode::BAD_REQUEST,
            DashboardError::Ingest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
