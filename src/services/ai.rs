//! AI orchestration: the two concurrency gates, the retry policy and the
//! image cache composed into the three model-backed operations.
//!
//! A gate permit is held only for the duration of the outbound call, not
//! across backoff sleeps, so a task waiting out a 503 does not starve the
//! gate for other tasks.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::error::{AiError, ModelError};
use crate::services::cache::ImageCache;
use crate::services::gemini::{GenerativeModel, TextOptions};
use crate::services::prompts;
use crate::services::retry::{INITIAL_DELAY, MAX_ATTEMPTS, retry_with_backoff};

/// Concurrent calls allowed against the text-generation endpoint, shared by
/// chapter simplification and chat.
pub const TEXT_CONCURRENCY: usize = 2;
/// Concurrent calls allowed against the image-generation endpoint.
pub const IMAGE_CONCURRENCY: usize = 1;

/// The structured reply demanded from the simplification call. Parsing is
/// all-or-nothing; a reply missing any field fails the operation.
#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedChapter {
    pub title: String,
    pub simplified_text: String,
    pub image_prompt: String,
}

/// Tagged outcome of the chat operation. Chat never propagates an error past
/// this boundary; failures are carried in `error`.
#[derive(Debug)]
pub struct ChatOutcome {
    pub success: bool,
    pub response: String,
    pub error: Option<String>,
}

pub struct AiService {
    model: Arc<dyn GenerativeModel>,
    text_gate: Semaphore,
    image_gate: Semaphore,
    image_cache: ImageCache,
}

impl AiService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        AiService {
            model,
            text_gate: Semaphore::new(TEXT_CONCURRENCY),
            image_gate: Semaphore::new(IMAGE_CONCURRENCY),
            image_cache: ImageCache::new(),
        }
    }

    /// One gated, retried call to the text endpoint.
    async fn call_text_endpoint(
        &self,
        prompt: &str,
        options: &TextOptions,
    ) -> Result<String, ModelError> {
        let model = &self.model;
        let gate = &self.text_gate;
        retry_with_backoff(
            || async move {
                let _permit = gate
                    .acquire()
                    .await
                    .map_err(|_| ModelError::Internal("text gate closed".into()))?;
                model.generate_text(prompt, options).await
            },
            MAX_ATTEMPTS,
            INITIAL_DELAY,
        )
        .await
    }

    /// Rewrite a chapter for young readers. Returns the full
    /// title/text/illustration bundle or fails; no partial result.
    pub async fn simplify_chapter(&self, raw_text: &str) -> Result<SimplifiedChapter, AiError> {
        info!(chars = raw_text.chars().count(), "simplifying chapter");

        let prompt = prompts::simplify_prompt(raw_text);
        let options = TextOptions {
            temperature: 0.6,
            json_reply: true,
        };
        let reply = self.call_text_endpoint(&prompt, &options).await?;

        let parsed: SimplifiedChapter = serde_json::from_str(reply.trim())
            .map_err(|e| AiError::MalformedModelReply {
                detail: e.to_string(),
            })?;

        info!(title = %parsed.title, "chapter simplified");
        Ok(parsed)
    }

    /// Render an illustration for `image_prompt`, consulting the cache first.
    ///
    /// A reply that carries no inline image data is not an error: it yields
    /// an empty string and caches nothing.
    pub async fn generate_image_cached(&self, image_prompt: &str) -> Result<String, AiError> {
        if let Some(hit) = self.image_cache.get(image_prompt).await {
            info!("image cache hit");
            return Ok(hit);
        }
        info!("image cache miss, generating");

        let contents = prompts::image_contents(image_prompt);
        let model = &self.model;
        let gate = &self.image_gate;
        let contents_ref = contents.as_str();
        let parts = retry_with_backoff(
            || async move {
                let _permit = gate
                    .acquire()
                    .await
                    .map_err(|_| ModelError::Internal("image gate closed".into()))?;
                model.generate_image(contents_ref).await
            },
            MAX_ATTEMPTS,
            INITIAL_DELAY,
        )
        .await?;

        for part in parts {
            if !part.data.is_empty() {
                let image = format!("data:image/png;base64,{}", STANDARD.encode(&part.data));
                self.image_cache
                    .insert(image_prompt.to_string(), image.clone())
                    .await;
                let cache_size = self.image_cache.len().await;
                info!(cache_size, "image generated and cached");
                return Ok(image);
            }
        }

        warn!("no image data in model reply");
        Ok(String::new())
    }

    /// Answer a question about the book from the supplied context. Always
    /// returns an outcome; failures are tagged, never raised.
    pub async fn chat(&self, message: &str, book_context: &str, book_title: &str) -> ChatOutcome {
        info!("generating chat response");

        let prompt = prompts::chat_prompt(message, book_context, book_title);
        let options = TextOptions {
            temperature: 0.7,
            json_reply: false,
        };

        match self.call_text_endpoint(&prompt, &options).await {
            Ok(answer) => {
                let answer = answer.trim().to_string();
                info!(chars = answer.len(), "chat response generated");
                ChatOutcome {
                    success: true,
                    response: answer,
                    error: None,
                }
            }
            Err(err) => {
                error!("chat generation failed: {err}");
                ChatOutcome {
                    success: false,
                    response: String::new(),
                    error: Some(format!("Failed to generate response: {err}")),
                }
            }
        }
    }
}
