//! Aggregate text report.
//!
//! Runs a selection of metrics over one text and gathers the results into a
//! single serializable [`TextReport`]. Callers can also invoke the metrics in
//! [`crate::metrics`] individually.

use std::collections::HashSet;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::metrics::{self, WordFrequency};
use crate::text;

/// One of the text metrics a report can include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Metric {
    /// Occurrences of specific words.
    WordCount,
    /// The most frequent word.
    MostCommon,
    /// Mean word length in letters.
    AverageLength,
    /// Number of blank-line separated paragraphs.
    Paragraphs,
    /// Number of sentences.
    Sentences,
}

impl Metric {
    /// Every metric, in report order.
    pub const ALL: &'static [Self] = &[
        Self::WordCount,
        Self::MostCommon,
        Self::AverageLength,
        Self::Paragraphs,
        Self::Sentences,
    ];

    /// Returns the metric's kebab-case name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WordCount => "word-count",
            Self::MostCommon => "most-common",
            Self::AverageLength => "average-length",
            Self::Paragraphs => "paragraphs",
            Self::Sentences => "sentences",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| MetricError::Unknown {
                name: s.to_string(),
                available: Self::ALL
                    .iter()
                    .map(Self::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Occurrences of one requested word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordCount {
    /// The word as requested (original casing).
    pub word: String,
    /// Case-insensitive whole-word occurrences.
    pub count: usize,
}

/// The most frequent word, if the text has any words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MostCommonWord {
    /// The lowercased word, or `None` if the text has no words.
    pub word: Option<String>,
    /// How often it occurs (0 when `word` is `None`).
    pub occurrences: usize,
}

impl From<Option<WordFrequency>> for MostCommonWord {
    fn from(top: Option<WordFrequency>) -> Self {
        match top {
            Some(f) => Self {
                word: Some(f.word),
                occurrences: f.count,
            },
            None => Self {
                word: None,
                occurrences: 0,
            },
        }
    }
}

/// Result of running a set of metrics over a text.
///
/// Metrics that were not requested are `None` and left out of JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextReport {
    /// Whitespace-separated token count, punctuation and numbers included.
    pub approximate_word_count: usize,
    /// Counts for each requested word, in request order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_counts: Option<Vec<WordCount>>,
    /// The most frequent word.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_common: Option<MostCommonWord>,
    /// Mean word length in letters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_word_length: Option<f64>,
    /// Paragraph count (at least 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<usize>,
    /// Sentence count (at least 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentences: Option<usize>,
}

/// Build a report over `text`.
///
/// # Arguments
///
/// * `text`: The text to analyze.
/// * `words`: Words to count for [`Metric::WordCount`].
/// * `metrics`: Metrics to run. If `None`, runs all.
#[tracing::instrument(skip(text, words), fields(text_len = text.len(), word_count = words.len()))]
pub fn build_report(text: &str, words: &[String], metrics: Option<&[Metric]>) -> TextReport {
    let enabled: HashSet<Metric> = metrics.map_or_else(
        || Metric::ALL.iter().copied().collect(),
        |list| list.iter().copied().collect(),
    );
    tracing::debug!(metrics = enabled.len(), "building text report");

    let word_counts = enabled.contains(&Metric::WordCount).then(|| {
        words
            .iter()
            .map(|w| WordCount {
                word: w.clone(),
                count: metrics::count_specific_word(text, w),
            })
            .collect()
    });

    let most_common = enabled
        .contains(&Metric::MostCommon)
        .then(|| MostCommonWord::from(metrics::most_common_word_frequency(text)));

    let average_word_length = enabled
        .contains(&Metric::AverageLength)
        .then(|| metrics::calculate_average_word_length(text));

    let paragraphs = enabled
        .contains(&Metric::Paragraphs)
        .then(|| metrics::count_paragraphs(text).get());

    let sentences = enabled
        .contains(&Metric::Sentences)
        .then(|| metrics::count_sentences(text).get());

    TextReport {
        approximate_word_count: text::count_whitespace_tokens(text),
        word_counts,
        most_common,
        average_word_length,
        paragraphs,
        sentences,
    }
}
