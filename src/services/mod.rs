pub mod ai;
pub mod cache;
pub mod chapterizer;
pub mod gemini;
pub mod pdf;
pub mod prompts;
pub mod retry;
