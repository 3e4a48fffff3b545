//! HTTP endpoint handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::Value;
use tracing::{debug, error, warn};

use faqmatch_core::FALLBACK_RESPONSE;

use super::state::AppState;

/// Serve the chat page
pub async fn serve_index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

/// POST /get: answer `{"message": "..."}` with `{"response": "..."}`
///
/// Missing, non-string or blank messages are rejected here and never reach
/// the matcher.
pub async fn ask(State(state): State<AppState>, body: String) -> Response {
    let message = match extract_message(&body) {
        Ok(message) => message,
        Err(reason) => {
            warn!("Rejected chat request: {}", reason);
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": reason })),
            )
                .into_response();
        }
    };

    debug!("Chat request: {} bytes", message.len());

    // Embedding is CPU-bound, keep it off the async workers
    let matcher = Arc::clone(&state.matcher);
    let response = match tokio::task::spawn_blocking(move || matcher.respond(&message)).await {
        Ok(response) => response,
        Err(e) => {
            error!("Matcher task failed: {}", e);
            FALLBACK_RESPONSE.to_string()
        }
    };

    Json(serde_json::json!({ "response": response })).into_response()
}

/// GET /health: corpus and model summary
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let matcher = &state.matcher;
    Json(serde_json::json!({
        "status": "ok",
        "entries": matcher.len(),
        "dimensions": matcher.index().dimensions(),
        "model": matcher.model_name(),
        "threshold": matcher.threshold(),
    }))
}

fn extract_message(body: &str) -> Result<String, &'static str> {
    let payload: Value = serde_json::from_str(body).map_err(|_| "Request body must be JSON")?;

    match payload.get("message") {
        None | Some(Value::Null) => Err("Missing 'message' field"),
        Some(Value::String(message)) if message.trim().is_empty() => {
            Err("'message' must not be empty")
        }
        Some(Value::String(message)) => Ok(message.clone()),
        Some(_) => Err("'message' must be a string"),
    }
}
