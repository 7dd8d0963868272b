//! Prompt text for the three model operations.
//!
//! Kept in one module so wording changes never touch the retry/gate logic,
//! and so tests can assert on prompt construction directly.

use super::chapterizer::truncate_chars;

/// How much of a chapter's raw text is sent with the simplification request.
pub const SIMPLIFY_EXCERPT_CHARS: usize = 2200;

/// The answer the chat model is told to give when the book context does not
/// contain the information asked for.
pub const NO_ANSWER_PHRASE: &str = "I don't have that information in the story";

/// Build the chapter-simplification prompt. The model must reply with JSON
/// holding `title`, `simplified_text` and `image_prompt`.
pub fn simplify_prompt(raw_text: &str) -> String {
    let excerpt = truncate_chars(raw_text, SIMPLIFY_EXCERPT_CHARS);
    format!(
        r#"You are creating a children's storybook for kids aged 6 to 8.

Your task:
1. Create a SHORT chapter title
2. Rewrite the chapter in VERY SIMPLE ENGLISH
3. Create ONE image description for an illustration

IMPORTANT RULES:
- Use simple words a child can understand
- Use short sentences (8-12 words max)
- Sound like a bedtime story
- Do NOT explain morals
- Do NOT use difficult words
- Do NOT talk to the reader
- Do NOT mention chapters, summaries, or rewriting
- Start the story directly

TITLE RULES:
- 2 or 3 words only
- NO verbs (only nouns & adjectives)
- Easy words for kids
- Title Case (Example: "Magic Forest", "Lost Puppy")

IMAGE PROMPT RULES:
- Describe ONE clear scene
- Colorful children's book illustration
- Happy, soft, friendly style
- No violence, fear, or darkness

Return ONLY valid JSON in this exact format:

{{
  "title": "Example Title",
  "simplified_text": "Very simple story text here.",
  "image_prompt": "Colorful children's illustration description"
}}

Chapter text:
{excerpt}"#
    )
}

/// Contents sent to the image endpoint for an illustration prompt.
pub fn image_contents(image_prompt: &str) -> String {
    format!("Children's book illustration, colorful: {image_prompt}")
}

/// Build the context-grounded chat prompt.
pub fn chat_prompt(message: &str, book_context: &str, book_title: &str) -> String {
    format!(
        r#"You are a helpful assistant that answers questions about a children's storybook.

Book Title: {book_title}

Book Content:
{book_context}

User Question: {message}

Instructions:
- Answer the question based ONLY on the book content provided above
- If the answer is not in the book, say "{NO_ANSWER_PHRASE}"
- Keep answers simple and friendly, suitable for children aged 6-8
- Be concise but informative
- Use a warm, storytelling tone

Answer:"#
    )
}
