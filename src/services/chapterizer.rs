//! Splitting extracted book text into raw chapters.
//!
//! Primary strategy: find "chapter N" markers and cut the text at each one.
//! When no marker is found at all the text is chopped into fixed-size word
//! blocks instead, so every upload yields something readable.

use regex::Regex;

pub const MAX_CHAPTERS: usize = 10;
pub const MAX_CHAPTER_CHARS: usize = 2500;
pub const MAX_TITLE_CHARS: usize = 80;
pub const DEFAULT_TITLE: &str = "Kids Book";

const FALLBACK_BLOCK_WORDS: usize = 500;
const FALLBACK_WORD_LIMIT: usize = 5000;

const CHAPTER_MARKER: &str = r"(?i)chapter\s+\d+";

/// A chapter as produced by splitting: a 1-based sequential number and the
/// raw text between its marker and the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChapter {
    pub number: u32,
    pub text: String,
}

/// Split book text into at most [`MAX_CHAPTERS`] chapters.
///
/// Each chapter body is trimmed and truncated to [`MAX_CHAPTER_CHARS`]
/// characters. Numbers are reassigned 1..n in document order regardless of
/// the numbers printed in the markers.
pub fn split_into_chapters(text: &str) -> Vec<RawChapter> {
    let chapters = match Regex::new(CHAPTER_MARKER) {
        Ok(marker) => {
            let positions: Vec<_> = marker.find_iter(text).collect();
            let mut out = Vec::with_capacity(positions.len().min(MAX_CHAPTERS));
            for (i, m) in positions.iter().take(MAX_CHAPTERS).enumerate() {
                let body_end = positions.get(i + 1).map_or(text.len(), |n| n.start());
                let body = text[m.end()..body_end].trim();
                out.push(RawChapter {
                    number: i as u32 + 1,
                    text: truncate_chars(body, MAX_CHAPTER_CHARS).to_string(),
                });
            }
            out
        }
        Err(_) => Vec::new(),
    };

    if chapters.is_empty() {
        fallback_blocks(text)
    } else {
        chapters
    }
}

/// No markers: package the first [`FALLBACK_WORD_LIMIT`] words as blocks of
/// [`FALLBACK_BLOCK_WORDS`] words each.
fn fallback_blocks(text: &str) -> Vec<RawChapter> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let limit = words.len().min(FALLBACK_WORD_LIMIT);

    let mut out = Vec::new();
    let mut start = 0;
    while start < limit && out.len() < MAX_CHAPTERS {
        let end = (start + FALLBACK_BLOCK_WORDS).min(limit);
        let block = words[start..end].join(" ");
        out.push(RawChapter {
            number: out.len() as u32 + 1,
            text: truncate_chars(&block, MAX_CHAPTER_CHARS).to_string(),
        });
        start = end;
    }
    out
}

/// The book title is the first line of the text, capped at
/// [`MAX_TITLE_CHARS`] characters, or [`DEFAULT_TITLE`] when that is empty.
pub fn derive_title(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let title = truncate_chars(first_line, MAX_TITLE_CHARS);
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Truncate to at most `max` characters without splitting a UTF-8 sequence.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
