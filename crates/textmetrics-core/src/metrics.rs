//! The five text metrics.
//!
//! Every function here is pure and total. Degenerate input never errors;
//! each metric has its own fallback instead:
//!
//! | Metric | Fallback |
//! |--------|----------|
//! | [`count_specific_word`] | `0` |
//! | [`identify_most_common_word`] | `None` |
//! | [`calculate_average_word_length`] | `0.0` |
//! | [`count_paragraphs`] | `1` |
//! | [`count_sentences`] | `1` |
//!
//! The paragraph and sentence floors are carried by [`NonZeroUsize`], so a
//! zero count cannot be constructed.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

/// A distinct word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequency {
    /// The lowercased word.
    pub word: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Count case-insensitive, whole-word occurrences of `word` in `text`.
///
/// A match must sit on word boundaries at both ends, so `"pie"` is not found
/// inside `"pieces"`. Characters in `word` are matched literally. Returns 0
/// if either argument is empty.
///
/// ```
/// use textmetrics_core::count_specific_word;
///
/// assert_eq!(count_specific_word("Apple apple APPLE", "apple"), 3);
/// assert_eq!(count_specific_word("pineapple", "apple"), 0);
/// ```
pub fn count_specific_word(text: &str, word: &str) -> usize {
    if text.is_empty() || word.is_empty() {
        return 0;
    }

    let haystack = text.to_lowercase();
    let needle = word.to_lowercase();
    let (Some(first), Some(last)) = (needle.chars().next(), needle.chars().next_back()) else {
        return 0;
    };

    let mut count = 0;
    let mut pos = 0;
    while let Some(offset) = haystack[pos..].find(&needle) {
        let start = pos + offset;
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();

        if is_boundary(before, Some(first)) && is_boundary(Some(last), after) {
            count += 1;
            pos = end;
        } else {
            pos = start + first.len_utf8();
        }
    }
    count
}

/// Word characters for boundary purposes: letters, digits and `_`.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when exactly one side of the gap between `left` and `right` is a
/// word character. A missing side counts as a non-word character.
fn is_boundary(left: Option<char>, right: Option<char>) -> bool {
    left.is_some_and(is_word_char) != right.is_some_and(is_word_char)
}

/// Find the most frequent word, or `None` if `text` has no words.
///
/// Ties go to the word that appears first in the text.
///
/// ```
/// use textmetrics_core::identify_most_common_word;
///
/// assert_eq!(
///     identify_most_common_word("the cat sat on the mat the end").as_deref(),
///     Some("the")
/// );
/// assert_eq!(identify_most_common_word("123 456"), None);
/// ```
pub fn identify_most_common_word(text: &str) -> Option<String> {
    most_common_word_frequency(text).map(|f| f.word)
}

/// Like [`identify_most_common_word`], but also returns the count.
pub fn most_common_word_frequency(text: &str) -> Option<WordFrequency> {
    let mut best: Option<WordFrequency> = None;
    for entry in frequency_table(text) {
        if best.as_ref().is_none_or(|b| entry.count > b.count) {
            best = Some(entry);
        }
    }
    best
}

/// Every distinct word with its count, most frequent first.
///
/// Words with equal counts keep the order of their first appearance.
pub fn word_frequencies(text: &str) -> Vec<WordFrequency> {
    let mut table = frequency_table(text);
    // sort_by is stable, so first-appearance order survives among ties
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

/// Mean length of the words in `text`, or `0.0` if there are none.
///
/// ```
/// use textmetrics_core::calculate_average_word_length;
///
/// assert_eq!(calculate_average_word_length("a bb ccc"), 2.0);
/// assert_eq!(calculate_average_word_length(""), 0.0);
/// ```
pub fn calculate_average_word_length(text: &str) -> f64 {
    let (letters, count) = text::words(text).fold((0_usize, 0_usize), |(letters, count), w| {
        (letters + w.len(), count + 1)
    });

    if count == 0 {
        0.0
    } else {
        letters as f64 / count as f64
    }
}

/// Count blank-line separated paragraphs. Never less than 1.
///
/// ```
/// use textmetrics_core::count_paragraphs;
///
/// assert_eq!(count_paragraphs("one\n\ntwo\n\nthree").get(), 3);
/// assert_eq!(count_paragraphs("").get(), 1);
/// ```
pub fn count_paragraphs(text: &str) -> NonZeroUsize {
    NonZeroUsize::new(text::split_paragraphs(text).len()).unwrap_or(NonZeroUsize::MIN)
}

/// Count sentences ended by runs of `.`, `!`, or `?`. Never less than 1.
///
/// ```
/// use textmetrics_core::count_sentences;
///
/// assert_eq!(count_sentences("One. Two! Three?").get(), 3);
/// assert_eq!(count_sentences("").get(), 1);
/// ```
pub fn count_sentences(text: &str) -> NonZeroUsize {
    NonZeroUsize::new(text::split_sentences(text).len()).unwrap_or(NonZeroUsize::MIN)
}

/// Word counts in first-appearance order.
fn frequency_table(text: &str) -> Vec<WordFrequency> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut table: Vec<WordFrequency> = Vec::new();

    for raw in text::words(text) {
        let word = raw.to_ascii_lowercase();
        if let Some(&i) = index.get(&word) {
            table[i].count += 1;
        } else {
            index.insert(word.clone(), table.len());
            table.push(WordFrequency { word, count: 1 });
        }
    }

    table
}
