//! Logging setup for the CLI.
//!
//! Human-readable events go to stderr so stdout stays clean for reports,
//! JSON, and the MCP transport. When a log path or directory is configured,
//! the same events are also written as JSON lines through a non-blocking
//! file appender.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Explicit log file path.
const LOG_PATH_ENV: &str = "TEXTMETRICS_LOG_PATH";
/// Log directory, overriding the config file's `log_dir`.
const LOG_DIR_ENV: &str = "TEXTMETRICS_LOG_DIR";
/// File name for daily-rotated logs inside a log directory.
const LOG_FILE_PREFIX: &str = "textmetrics.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact file to append JSON lines to. Takes precedence over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated JSON line files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `TEXTMETRICS_LOG_PATH` and `TEXTMETRICS_LOG_DIR`, falling back to
    /// the configured log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            log_dir: std::env::var_os(LOG_DIR_ENV)
                .map(PathBuf::from)
                .or(config_log_dir),
        }
    }
}

/// Keeps the background log writer alive; drop it to flush file logs.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` shows only errors, `-v`
/// enables debug, `-vv` enables trace, and the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_for(quiet, verbose, default_level))
}

fn level_for(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let (file_layer, file_guard) = match file_writer(config)? {
        Some((writer, guard)) => (
            Some(fmt::layer().json().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard {
        _file_guard: file_guard,
    })
}

/// Open the JSONL writer for the configured destination.
fn file_writer(config: &ObservabilityConfig) -> anyhow::Result<Option<(NonBlocking, WorkerGuard)>> {
    if let Some(ref path) = config.log_path {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .with_context(|| format!("log path has no file name: {}", path.display()))?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let appender = tracing_appender::rolling::never(dir, file_name);
        return Ok(Some(tracing_appender::non_blocking(appender)));
    }

    if let Some(ref dir) = config.log_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        return Ok(Some(tracing_appender::non_blocking(appender)));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(level_for(true, 2, "info"), "error");
    }

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for(false, 0, "warn"), "warn");
        assert_eq!(level_for(false, 1, "warn"), "debug");
        assert_eq!(level_for(false, 3, "warn"), "trace");
    }

    #[test]
    fn no_file_logging_by_default() {
        let config = ObservabilityConfig::default();
        assert!(file_writer(&config).unwrap().is_none());
    }

    #[test]
    fn log_dir_is_created() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("logs").join("nested");
        let config = ObservabilityConfig {
            log_path: None,
            log_dir: Some(dir.clone()),
        };
        assert!(file_writer(&config).unwrap().is_some());
        assert!(dir.is_dir());
    }

    #[test]
    fn log_path_parent_is_created() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out").join("run.jsonl");
        let config = ObservabilityConfig {
            log_path: Some(path),
            log_dir: None,
        };
        assert!(file_writer(&config).unwrap().is_some());
        assert!(tmp.path().join("out").is_dir());
    }
}
