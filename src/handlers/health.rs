use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// GET /health
///
/// Reports unhealthy when the text provider cannot be reached.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.text_provider.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "chatbot-service",
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": "chatbot-service",
                "error": e.to_string()
            })),
        ),
    }
}
