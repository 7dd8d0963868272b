//! HTTP surface: one handler module per endpoint.

pub mod chat;
pub mod images;
pub mod process;
pub mod simplify;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::ai::AiService;

#[derive(Clone)]
pub struct AppState {
    pub ai: Arc<AiService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/process_pdf", post(process::process_pdf))
        .route("/simplify_chapter", post(simplify::simplify_chapter))
        .route("/generate_images", post(images::generate_images))
        .route("/chat", post(chat::chat))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::AllowMethods::any())
                .allow_headers(tower_http::cors::AllowHeaders::any()),
        )
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
