use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{error, info};

use super::AppState;
use crate::models::{ChatReply, ChatRequest, ErrorBody};

pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorBody>)> {
    info!("chat request");

    let outcome = state
        .ai
        .chat(&req.message, &req.book_context, &req.book_title)
        .await;

    if outcome.success {
        Ok(Json(ChatReply {
            success: true,
            response: outcome.response,
        }))
    } else {
        let detail = outcome
            .error
            .unwrap_or_else(|| "Failed to generate chat response".to_string());
        error!("chat failed: {detail}");
        Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { detail })))
    }
}
