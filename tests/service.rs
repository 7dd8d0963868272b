//! Router-level tests: each endpoint exercised with a scripted model behind
//! the orchestration layer, no network anywhere.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use storybook::error::ModelError;
use storybook::routes::{AppState, router};
use storybook::services::ai::AiService;
use storybook::services::gemini::{GenerativeModel, InlineImage, TextOptions};

const VALID_REPLY: &str =
    r#"{"title":"Magic Forest","simplified_text":"A fox ran home.","image_prompt":"a happy fox"}"#;

struct ScriptedModel {
    text_reply: Result<&'static str, u16>,
    image_payload: Option<Vec<u8>>,
    image_calls: AtomicU32,
}

impl ScriptedModel {
    fn replying(text: &'static str) -> Self {
        ScriptedModel {
            text_reply: Ok(text),
            image_payload: None,
            image_calls: AtomicU32::new(0),
        }
    }

    fn failing(status: u16) -> Self {
        ScriptedModel {
            text_reply: Err(status),
            ..Self::replying("")
        }
    }

    fn with_image(payload: Vec<u8>) -> Self {
        ScriptedModel {
            image_payload: Some(payload),
            ..Self::replying("")
        }
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_text(
        &self,
        _prompt: &str,
        _options: &TextOptions,
    ) -> Result<String, ModelError> {
        match self.text_reply {
            Ok(text) => Ok(text.to_string()),
            Err(status) => Err(ModelError::Api {
                status,
                message: "kaboom".into(),
            }),
        }
    }

    async fn generate_image(&self, _contents: &str) -> Result<Vec<InlineImage>, ModelError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .image_payload
            .clone()
            .map(|data| vec![InlineImage { data }])
            .unwrap_or_default())
    }
}

fn app(model: ScriptedModel) -> (Arc<ScriptedModel>, Router) {
    let model = Arc::new(model);
    let state = AppState {
        ai: Arc::new(AiService::new(model.clone())),
    };
    (model, router(state))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn simplify_chapter_returns_the_full_bundle() {
    let (_, app) = app(ScriptedModel::replying(VALID_REPLY));

    let response = app
        .oneshot(post_json(
            "/simplify_chapter",
            json!({ "chapter_number": 2, "raw_text": "Once upon a time" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["chapter_number"], json!(2));
    assert_eq!(body["title"], json!("Magic Forest"));
    assert_eq!(body["simplified_text"], json!("A fox ran home."));
    assert_eq!(body["image_prompt"], json!("a happy fox"));
}

#[tokio::test]
async fn simplify_chapter_maps_malformed_replies_to_500() {
    let (_, app) = app(ScriptedModel::replying("this is not json"));

    let response = app
        .oneshot(post_json(
            "/simplify_chapter",
            json!({ "chapter_number": 1, "raw_text": "text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Failed to simplify chapter")
    );
}

#[tokio::test]
async fn chat_returns_trimmed_answer() {
    let (_, app) = app(ScriptedModel::replying("  The fox is kind.  "));

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({ "message": "Who is kind?", "book_context": "The fox is kind." }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["response"], json!("The fox is kind."));
}

#[tokio::test]
async fn chat_maps_failures_to_500_with_a_message() {
    let (_, app) = app(ScriptedModel::failing(500));

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({ "message": "q", "book_context": "ctx", "book_title": "My Book" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("kaboom"));
}

#[tokio::test]
async fn generate_images_caches_by_prompt() {
    let (model, app) = app(ScriptedModel::with_image(vec![1, 2, 3]));
    let request =
        || post_json("/generate_images", json!({ "chapter_number": 1, "image_prompt": "a fox" }));

    let first = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let body = body_json(first).await;
    assert_eq!(body["image"], json!("data:image/png;base64,AQID"));

    let second = app.oneshot(request()).await.unwrap();
    let body = body_json(second).await;
    assert_eq!(body["image"], json!("data:image/png;base64,AQID"));

    assert_eq!(model.image_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generate_images_returns_empty_when_model_sends_no_image() {
    let (model, app) = app(ScriptedModel::replying(""));
    let request =
        || post_json("/generate_images", json!({ "chapter_number": 1, "image_prompt": "a fox" }));

    let response = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["image"], json!(""));

    // An empty result is never cached.
    app.oneshot(request()).await.unwrap();
    assert_eq!(model.image_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn process_pdf_without_file_field_is_a_400() {
    let (_, app) = app(ScriptedModel::replying(""));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process_pdf")
                .header(
                    header::CONTENT_TYPE,
                    "multipart/form-data; boundary=xyzzy",
                )
                .body(Body::from("--xyzzy--\r\n"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_check_answers_ok() {
    let (_, app) = app(ScriptedModel::replying(""));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}
