use crate::models::{ChatRequest, ChatResponse};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};

/// POST /chat
///
/// Always answers 200: a malformed body degrades to an empty message, and
/// generation failures come back inside `reply` as "Error: ..." so the chat
/// UI can show them as a bot message.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();

    let reply = state.reply_generator.generate_reply(&request.message).await;

    Json(ChatResponse {
        reply,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}
