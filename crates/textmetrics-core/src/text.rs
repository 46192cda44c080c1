//! Text segmentation.
//!
//! Provides word extraction, paragraph splitting, and sentence splitting
//! shared by the metric functions. Every splitter is total: empty,
//! whitespace-only, and punctuation-only input simply yield no segments.

use regex::Regex;
use std::sync::LazyLock;

/// A word is a maximal run of ASCII letters.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("valid regex"));

/// A paragraph break is a newline, any whitespace (including further
/// newlines), then another newline.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// A sentence break is a run of terminal punctuation.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Iterate over the words of `text` as they appear, without case folding.
///
/// Digits, apostrophes, hyphens, and non-ASCII letters all act as
/// separators, so `"don't"` yields `"don"` and `"t"`.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Extract lowercased words in scan order.
pub fn extract_words(text: &str) -> Vec<String> {
    words(text).map(str::to_ascii_lowercase).collect()
}

/// Split text into paragraphs separated by blank lines.
///
/// Runs of blank lines, including lines holding only spaces or tabs, count
/// as a single break. Returned slices are trimmed and never empty.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(text.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split text into sentences on runs of `.`, `!`, and `?`.
///
/// The terminators are not part of the returned slices.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Count whitespace-separated tokens, punctuation and digits included.
pub fn count_whitespace_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}
