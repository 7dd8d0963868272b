use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{error, info};

use super::AppState;
use crate::models::{ErrorBody, SimplifyChapterRequest, SimplifyChapterResponse};

pub async fn simplify_chapter(
    State(state): State<AppState>,
    Json(req): Json<SimplifyChapterRequest>,
) -> Result<Json<SimplifyChapterResponse>, (StatusCode, Json<ErrorBody>)> {
    info!(chapter = req.chapter_number, "simplify_chapter request");

    match state.ai.simplify_chapter(&req.raw_text).await {
        Ok(result) => Ok(Json(SimplifyChapterResponse {
            success: true,
            chapter_number: req.chapter_number,
            title: result.title,
            simplified_text: result.simplified_text,
            image_prompt: result.image_prompt,
        })),
        Err(e) => {
            error!(chapter = req.chapter_number, "failed to simplify chapter: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    detail: format!("Failed to simplify chapter: {e}"),
                }),
            ))
        }
    }
}
