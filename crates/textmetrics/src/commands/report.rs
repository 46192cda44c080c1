//! Report command: all metrics over one text.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use textmetrics_core::{Metric, TextReport, build_report};

use super::load_input;
use crate::sample;

/// Arguments for the `report` subcommand.
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// File to analyze (`-` reads stdin). Omit to use the built-in sample article.
    pub file: Option<Utf8PathBuf>,

    /// Word to count (repeatable or comma-separated).
    #[arg(short, long = "word", value_name = "WORD", value_delimiter = ',')]
    pub words: Vec<String>,

    /// Metrics to include (comma-separated). Omit for all.
    #[arg(long, value_enum, value_delimiter = ',')]
    pub metrics: Option<Vec<Metric>>,
}

/// Print a summary report for a file, stdin, or the sample article.
///
/// Word list precedence: `--word`, then config `words`, then the demo list.
#[instrument(name = "cmd_report", skip_all, fields(file = ?args.file))]
pub fn cmd_report(
    args: ReportArgs,
    global_json: bool,
    config_words: Option<&[String]>,
    config_metrics: Option<&[Metric]>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(words = ?args.words, metrics = ?args.metrics, "executing report command");

    let input = load_input(args.file.as_deref(), max_input_bytes)?;

    let words = if !args.words.is_empty() {
        args.words
    } else if let Some(list) = config_words {
        list.to_vec()
    } else {
        sample::demo_words()
    };
    let metrics = args.metrics.as_deref().or(config_metrics);

    let report = build_report(&input.text, &words, metrics);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&input.label, &report);
    }

    Ok(())
}

fn print_report(label: &str, report: &TextReport) {
    println!("{}", label.bold());
    println!(
        "\n  {} {}",
        "Approximate words:".cyan(),
        report.approximate_word_count
    );

    if let Some(ref counts) = report.word_counts {
        println!("\n  {}", "Word counts:".cyan());
        if counts.is_empty() {
            println!("    {}", "(no words requested)".dimmed());
        }
        for wc in counts {
            let count = if wc.count == 0 {
                wc.count.dimmed().to_string()
            } else {
                wc.count.to_string()
            };
            println!("    '{}': {}", wc.word, count);
        }
    }

    if let Some(ref mc) = report.most_common {
        match mc.word {
            Some(ref word) => println!(
                "\n  {} '{}' ({} occurrences)",
                "Most common word:".cyan(),
                word.green(),
                mc.occurrences
            ),
            None => println!("\n  {} {}", "Most common word:".cyan(), "none".yellow()),
        }
    }

    if let Some(avg) = report.average_word_length {
        println!(
            "\n  {} {:.2} characters",
            "Average word length:".cyan(),
            avg
        );
    }

    if let Some(paragraphs) = report.paragraphs {
        println!("\n  {} {}", "Paragraphs:".cyan(), paragraphs);
    }

    if let Some(sentences) = report.sentences {
        println!("\n  {} {}", "Sentences:".cyan(), sentences);
    }
}
