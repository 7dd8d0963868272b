use std::sync::Arc;

use storybook::config::Config;
use storybook::routes::{self, AppState};
use storybook::services::ai::AiService;
use storybook::services::gemini::{GeminiClient, GenerativeModel};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // A missing API key is a fatal startup error
    let config = Config::from_env()?;

    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::new(config.api_key.clone()));
    let state = AppState {
        ai: Arc::new(AiService::new(model)),
    };

    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
