use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

/// Liveness probe: `OK <version>` as plain text.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    format!("OK {}", state.version)
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
