//! HTTP surface: the analysis endpoint, the bundled page and a health probe.

mod assets;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::analysis::{AnalysisRequest, AnalysisResponse, Analyzer, ErrorBody};
use crate::error::AnalysisError;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub api_key_configured: bool,
}

impl AppState {
    pub fn new(analyzer: Arc<Analyzer>, api_key_configured: bool) -> Self {
        Self {
            analyzer,
            api_key_configured,
        }
    }
}

/// Health probe payload.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
    pub api_key_configured: bool,
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(assets::index))
        .route("/static/js/script.js", get(assets::script))
        .route("/static/css/styles.css", get(assets::styles))
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Debate coach listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AnalysisError> {
    let Json(request) =
        payload.map_err(|rejection| AnalysisError::InvalidBody(rejection.body_text()))?;

    // A panic inside the task surfaces as a JoinError, reported as 500.
    let analyzer = Arc::clone(&state.analyzer);
    let response = tokio::spawn(async move { analyzer.analyze(request).await })
        .await
        .map_err(|join_err| {
            error!(error = %join_err, "Analysis task failed");
            AnalysisError::Internal(join_err.to_string())
        })??;

    Ok(Json(response))
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: state.analyzer.settings().model.clone(),
        api_key_configured: state.api_key_configured,
    })
}
