//! Generative model boundary: a trait for the two endpoints the service
//! calls, plus the reqwest-backed Gemini REST implementation.
//!
//! The orchestration layer only sees `Arc<dyn GenerativeModel>`, so tests
//! inject scripted implementations instead of mocking HTTP.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::ModelError;

pub const TEXT_MODEL: &str = "gemini-2.5-flash";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Per-request knobs for the text endpoint.
#[derive(Debug, Clone)]
pub struct TextOptions {
    pub temperature: f64,
    /// Ask the endpoint for an `application/json` reply.
    pub json_reply: bool,
}

/// One inline image payload found in a model reply, already decoded to bytes.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub data: Vec<u8>,
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// One call to the text-generation endpoint. Returns the concatenated
    /// text of the first candidate, which may be empty.
    async fn generate_text(&self, prompt: &str, options: &TextOptions)
    -> Result<String, ModelError>;

    /// One call to the image-generation endpoint. Returns every inline image
    /// payload of the first candidate; an empty vec means the model produced
    /// no image data.
    async fn generate_image(&self, contents: &str) -> Result<Vec<InlineImage>, ModelError>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        GeminiClient {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    async fn generate_content(
        &self,
        model: &str,
        body: Value,
    ) -> Result<GenerateContentResponse, ModelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!(model, "calling generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Overloaded { message });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_text(
        &self,
        prompt: &str,
        options: &TextOptions,
    ) -> Result<String, ModelError> {
        let mut generation_config = json!({ "temperature": options.temperature });
        if options.json_reply {
            generation_config["responseMimeType"] = json!("application/json");
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        let reply = self.generate_content(TEXT_MODEL, body).await?;
        Ok(reply.first_candidate_text())
    }

    async fn generate_image(&self, contents: &str) -> Result<Vec<InlineImage>, ModelError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": contents }] }],
            "generationConfig": { "responseModalities": ["IMAGE"] },
        });

        let reply = self.generate_content(IMAGE_MODEL, body).await?;

        let mut images = Vec::new();
        for part in reply.first_candidate_parts() {
            if let Some(inline) = part.inline_data {
                match STANDARD.decode(inline.data.as_bytes()) {
                    Ok(data) => images.push(InlineImage { data }),
                    Err(e) => warn!("skipping undecodable inline image payload: {e}"),
                }
            }
        }
        Ok(images)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    data: String,
}

impl GenerateContentResponse {
    fn first_candidate_parts(self) -> Vec<Part> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
    }

    fn first_candidate_text(self) -> String {
        self.first_candidate_parts()
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("")
    }
}
