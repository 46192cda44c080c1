//! Error types for textmetrics-core.
//!
//! The metric functions themselves are total and never return these; they
//! cover configuration, input limits, and metric-name parsing.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised before text reaches the metrics.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The input exceeds the configured size limit.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// The limit that was exceeded.
        limit: usize,
    },
}

/// Result type alias using [`InputError`].
pub type InputResult<T> = Result<T, InputError>;

/// Errors from parsing metric names.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MetricError {
    /// An unknown metric name was provided.
    #[error("unknown metric: {name}. Use: {available}")]
    Unknown {
        /// The metric name that was requested.
        name: String,
        /// Comma-separated list of available metric names.
        available: String,
    },
}
