use serde::{Deserialize, Serialize};

/// One segment of the source book.
///
/// `raw_text` is fixed at split time; the simplified fields are filled in
/// together by the simplification operation, and `image` by image generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_number: u32,
    #[serde(default)]
    pub title: String,
    pub raw_text: String,
    #[serde(default)]
    pub simplified_text: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_prompt: String,
    #[serde(default)]
    pub simplified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub total_chapters: usize,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Deserialize)]
pub struct SimplifyChapterRequest {
    pub chapter_number: u32,
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct SimplifyChapterResponse {
    pub success: bool,
    pub chapter_number: u32,
    pub title: String,
    pub simplified_text: String,
    pub image_prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub chapter_number: u32,
    pub image_prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub book_context: String,
    #[serde(default = "default_book_title")]
    pub book_title: String,
}

fn default_book_title() -> String {
    "the book".to_string()
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub success: bool,
    pub response: String,
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Events pushed over the document-intake SSE stream.
///
/// Zero or more `progress` events, then exactly one terminal `complete` or
/// `error` event.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProcessEvent {
    Progress {
        progress: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Complete {
        data: Book,
        progress: u8,
    },
    Error {
        message: String,
    },
}
