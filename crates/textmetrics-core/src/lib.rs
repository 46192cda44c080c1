//! Core library for textmetrics.
//!
//! Descriptive statistics over prose: occurrences of a word, the most
//! frequent word, average word length, paragraph count, and sentence count.
//! The metric functions are pure, never fail, and are safe to call from any
//! number of threads.
//!
//! # Modules
//!
//! - [`metrics`] - The five text metrics
//! - [`text`] - Word, paragraph, and sentence segmentation
//! - [`report`] - Aggregate report over a selection of metrics
//! - [`markdown`] - Markdown to prose conversion
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use textmetrics_core::{
//!     calculate_average_word_length, count_paragraphs, count_sentences,
//!     count_specific_word, identify_most_common_word,
//! };
//!
//! let text = "The pie is hot. The crust is flaky!\n\nServe the pie warm?";
//!
//! assert_eq!(count_specific_word(text, "Pie"), 2);
//! assert_eq!(identify_most_common_word(text).as_deref(), Some("the"));
//! assert!(calculate_average_word_length(text) > 3.0);
//! assert_eq!(count_paragraphs(text).get(), 2);
//! assert_eq!(count_sentences(text).get(), 3);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod markdown;
pub mod metrics;
pub mod report;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, InputError, InputResult, MetricError};
pub use metrics::{
    WordFrequency, calculate_average_word_length, count_paragraphs, count_sentences,
    count_specific_word, identify_most_common_word, most_common_word_frequency,
    word_frequencies,
};
pub use report::{Metric, MostCommonWord, TextReport, WordCount, build_report};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Reject inputs larger than `limit` bytes. `None` means no limit.
pub const fn check_input_size(size: usize, limit: Option<usize>) -> InputResult<()> {
    match limit {
        Some(limit) if size > limit => Err(InputError::TooLarge { size, limit }),
        _ => Ok(()),
    }
}
