//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use textmetrics_core::{check_input_size, markdown};

use crate::sample;

pub mod info;
pub mod metric;
pub mod report;
#[cfg(feature = "mcp")]
pub mod serve;

/// Label shown for the built-in sample text.
pub const SAMPLE_LABEL: &str = "sample news article";

/// Text loaded for analysis, with a label for report headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText {
    /// File path, `stdin`, or the sample label.
    pub label: String,
    /// The prose to analyze (markdown already stripped).
    pub text: String,
}

/// Resolve the input for an analysis command.
///
/// * `None`: the built-in sample article.
/// * `-`: standard input.
/// * anything else: a file; `.md` files are reduced to prose first.
pub fn load_input(file: Option<&Utf8Path>, max_bytes: Option<usize>) -> anyhow::Result<InputText> {
    match file {
        None => Ok(InputText {
            label: SAMPLE_LABEL.to_string(),
            text: sample::NEWS_ARTICLE.to_string(),
        }),
        Some(path) if path.as_str() == "-" => Ok(InputText {
            label: "stdin".to_string(),
            text: read_stdin(max_bytes)?,
        }),
        Some(path) => {
            let content = read_input_file(path, max_bytes)?;
            let text = if path.extension() == Some("md") {
                markdown::strip_to_prose(&content)
            } else {
                content
            };
            Ok(InputText {
                label: path.to_string(),
                text,
            })
        }
    }
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    check_input_size(size, max_bytes).with_context(|| format!("refusing to read {path}"))?;

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Read standard input, reading at most one byte past the limit.
fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    let cap = max_bytes.map_or(u64::MAX, |max| {
        u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1)
    });
    std::io::stdin()
        .lock()
        .take(cap)
        .read_to_end(&mut buf)
        .context("failed to read standard input")?;

    check_input_size(buf.len(), max_bytes).context("refusing to read standard input")?;
    String::from_utf8(buf).context("standard input is not valid UTF-8")
}
