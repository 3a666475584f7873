//! Cathedral Structural Health Dashboard
//!
//! Holds the displayed reading batch and view parameters, refreshes synthetic
//! telemetry on a timer, and serves the current view over a JSON API.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod display;
mod error;
pub mod refresh;
mod routes;
mod settings;
pub mod store;

pub use error::DashboardError;
pub use refresh::RefreshLoop;
pub use settings::{DashboardSettings, SETTINGS_FILE};
pub use store::{DashboardStore, SharedStore, Snapshot, Theme};

/// Application state shared across handlers
pub struct AppState {
    /// Dashboard store
    pub store: SharedStore,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus renderer, when a recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: SharedStore, prometheus: Option<PrometheusHandle>) -> Self {
        Self {
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            prometheus,
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub reading_count: usize,
    pub live_mode: bool,
    pub revision: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/readings", get(routes::readings::get_readings))
        .route("/api/v1/readings.csv", get(routes::readings::get_readings_csv))
        .route("/api/v1/summary", get(routes::view::get_summary))
        .route("/api/v1/view", put(routes::view::put_view))
        .route("/api/v1/live", put(routes::view::put_live))
        .route("/api/v1/theme/toggle", post(routes::view::toggle_theme))
        .route(
            "/api/v1/history",
            post(routes::history::post_history).delete(routes::history::delete_history),
        )
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    let snapshot = store.snapshot();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        reading_count: snapshot.reading_count,
        live_mode: snapshot.live_mode,
        revision: snapshot.revision,
    })
}

/// Prometheus scrape handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set");
    }
}

/// Run the dashboard: refresh loop, terminal display and API server
pub async fn run(
    settings: DashboardSettings,
    prometheus: Option<PrometheusHandle>,
) -> Result<(), DashboardError> {
    let params = settings.view_params()?;
    let mut generator = refresh::generator_for(&settings);
    let baseline = refresh::initial_baseline(&settings, &mut generator);

    let store = DashboardStore::new(baseline, params, settings.thresholds, settings.live_mode);
    let display_rx = store.subscribe();
    let store: SharedStore = Arc::new(RwLock::new(store));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh = tokio::spawn(RefreshLoop::new(store.clone(), &settings, generator).run(shutdown_rx));
    let display = tokio::spawn(display::run_display(display_rx));

    let app = create_router(Arc::new(AppState::new(store, prometheus))).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    info!("Starting API server on {}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    let _ = refresh.await;
    display.abort();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use chrono::NaiveDate;
    use reading_generator::ReadingGenerator;
    use risk_view::{RiskThresholds, ViewParams};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> (Router, SharedStore) {
        let now = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap().and_hms_opt(5, 5, 5).unwrap();
        let batch = ReadingGenerator::from_seed(21).next_batch(12, now);
        let store: SharedStore = Arc::new(RwLock::new(DashboardStore::new(
            batch,
            ViewParams::default(),
            RiskThresholds::default(),
            true,
        )));
        (create_router(Arc::new(AppState::new(store.clone(), None))), store)
    }

    async fn call(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = call(app, Method::GET, "/api/v1/health", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["reading_count"], 12);
    }

    #[tokio::test]
    async fn test_readings_newest_first_with_limit() {
        let (app, _) = app();
        let (status, body) = call(app, Method::GET, "/api/v1/readings?limit=3", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["count"], 3);
        assert_eq!(body["meta"]["total"], 12);
        assert_eq!(body["data"][0]["Timestamp"], "2024-05-05 05:05:05");
        assert_eq!(body["data"][1]["Timestamp"], "2024-05-05 04:55:05");
    }

    #[tokio::test]
    async fn test_put_view_updates_summary() {
        let (app, store) = app();
        let (status, body) = call(
            app,
            Method::PUT,
            "/api/v1/view",
            Body::from(r#"{"region":"Nave","crack_threshold":1.0}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["params"]["region_filter"], "Nave");
        assert_eq!(body["params"]["crack_threshold"], 1.0);
        assert_eq!(store.read().await.snapshot().revision, 1);
    }

    #[tokio::test]
    async fn test_put_view_rejects_threshold() {
        let (app, store) = app();
        let (status, body) = call(
            app,
            Method::PUT,
            "/api/v1/view",
            Body::from(r#"{"crack_threshold":1.9}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("1.9"));
        assert_eq!(store.read().await.snapshot().revision, 0);
    }

    #[tokio::test]
    async fn test_live_and_theme_controls() {
        let (app, store) = app();
        let (_, body) = call(app.clone(), Method::PUT, "/api/v1/live", Body::from(r#"{"enabled":false}"#)).await;
        assert_eq!(body["live_mode"], false);

        let (_, body) = call(app, Method::POST, "/api/v1/theme/toggle", Body::empty()).await;
        assert_eq!(body["theme"], "dark");
        assert!(!store.read().await.live_mode());
    }

    #[tokio::test]
    async fn test_history_upload_and_clear() {
        let (app, _) = app();
        let csv = "Timestamp,Region,CrackSensitivity,StressScore,LoadPathRisk,RepairStatus\n\
                   2022-02-02 02:02:02,Apse,1.45,0.99,0.95,Critical\n";

        let (status, body) = call(
            app.clone(),
            Method::POST,
            "/api/v1/history?filename=survey.csv",
            Body::from(csv),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["readings"], 1);

        let (_, summary) = call(app.clone(), Method::GET, "/api/v1/summary", Body::empty()).await;
        assert_eq!(summary["source"]["kind"], "history");
        assert_eq!(summary["summary"]["alert"], true);
        assert_eq!(summary["summary"]["critical_count"], 1);

        let (_, body) = call(app.clone(), Method::DELETE, "/api/v1/history", Body::empty()).await;
        assert_eq!(body["cleared"], true);

        let (_, summary) = call(app, Method::GET, "/api/v1/summary", Body::empty()).await;
        assert_eq!(summary["source"]["kind"], "generated");
        assert_eq!(summary["reading_count"], 12);
    }

    #[tokio::test]
    async fn test_bad_upload_is_unprocessable() {
        let (app, store) = app();
        let (status, body) = call(
            app,
            Method::POST,
            "/api/v1/history?filename=survey.xlsx",
            Body::from("binary"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("Unsupported"));
        assert_eq!(store.read().await.displayed().len(), 12);
    }

    #[tokio::test]
    async fn test_csv_export() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/readings.csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/csv");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let batch = history_loader::parse_csv(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(batch.len(), 12);
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
