//! Metric command: print a single metric value.

use camino::Utf8PathBuf;
use clap::Args;
use serde_json::json;
use tracing::{debug, instrument};

use textmetrics_core::{
    Metric, WordCount, calculate_average_word_length, count_paragraphs, count_sentences,
    count_specific_word, most_common_word_frequency,
};

use super::load_input;

/// Arguments for the `metric` subcommand.
#[derive(Args, Debug)]
pub struct MetricArgs {
    /// Metric to compute.
    #[arg(value_enum)]
    pub metric: Metric,

    /// File to analyze (`-` reads stdin). Omit to use the built-in sample article.
    pub file: Option<Utf8PathBuf>,

    /// Word to count for `word-count` (repeatable or comma-separated).
    #[arg(short, long = "word", value_name = "WORD", value_delimiter = ',')]
    pub words: Vec<String>,
}

/// Print one metric for a file, stdin, or the sample article.
#[instrument(name = "cmd_metric", skip_all, fields(metric = %args.metric, file = ?args.file))]
pub fn cmd_metric(
    args: MetricArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(words = ?args.words, "executing metric command");

    if args.metric == Metric::WordCount && args.words.is_empty() {
        anyhow::bail!("the word-count metric needs at least one --word");
    }

    let input = load_input(args.file.as_deref(), max_input_bytes)?;
    let text = input.text.as_str();

    match args.metric {
        Metric::WordCount => {
            let counts: Vec<WordCount> = args
                .words
                .into_iter()
                .map(|word| WordCount {
                    count: count_specific_word(text, &word),
                    word,
                })
                .collect();
            if global_json {
                print_json(args.metric, json!(counts))?;
            } else if let [only] = counts.as_slice() {
                println!("{}", only.count);
            } else {
                for wc in &counts {
                    println!("{}: {}", wc.word, wc.count);
                }
            }
        }
        Metric::MostCommon => {
            let top = most_common_word_frequency(text);
            if global_json {
                print_json(args.metric, json!(top))?;
            } else {
                match top {
                    Some(f) => println!("{}", f.word),
                    None => println!("none"),
                }
            }
        }
        Metric::AverageLength => {
            let avg = calculate_average_word_length(text);
            if global_json {
                print_json(args.metric, json!(avg))?;
            } else {
                println!("{avg:.2}");
            }
        }
        Metric::Paragraphs => {
            let n = count_paragraphs(text).get();
            if global_json {
                print_json(args.metric, json!(n))?;
            } else {
                println!("{n}");
            }
        }
        Metric::Sentences => {
            let n = count_sentences(text).get();
            if global_json {
                print_json(args.metric, json!(n))?;
            } else {
                println!("{n}");
            }
        }
    }

    Ok(())
}

fn print_json(metric: Metric, value: serde_json::Value) -> anyhow::Result<()> {
    let out = json!({ "metric": metric, "value": value });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
