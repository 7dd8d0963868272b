use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{error, info};

use super::AppState;
use crate::models::{ErrorBody, ImageRequest, ImageResponse};

/// The `image` field is a `data:image/png;base64,...` string, or empty when
/// the model produced no image data.
pub async fn generate_images(
    State(state): State<AppState>,
    Json(req): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, (StatusCode, Json<ErrorBody>)> {
    info!(chapter = req.chapter_number, "generate_images request");

    match state.ai.generate_image_cached(&req.image_prompt).await {
        Ok(image) => {
            info!(chapter = req.chapter_number, "image generation complete");
            Ok(Json(ImageResponse { image }))
        }
        Err(e) => {
            error!(chapter = req.chapter_number, "image generation failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    detail: format!("Failed to generate image: {e}"),
                }),
            ))
        }
    }
}
