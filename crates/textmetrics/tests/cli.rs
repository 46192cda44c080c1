//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run the binary with `args` and parse stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = cmd().args(args).output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn long_help_lists_environment_variables() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TEXTMETRICS_MAX_INPUT_BYTES"));
}

#[test]
fn short_help_flag_shows_usage() {
    cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let json = run_json(&["info", "--json"]);

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"].is_object());
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

#[test]
fn invalid_color_rejected() {
    cmd()
        .args(["--color", "sometimes", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Report Command
// =============================================================================

#[test]
fn report_on_sample_prints_summary() {
    cmd()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("sample news article"))
        .stdout(predicate::str::contains("'Apple': 16"))
        .stdout(predicate::str::contains("'pie': 21"))
        .stdout(predicate::str::contains("(54 occurrences)"))
        .stdout(predicate::str::contains("5.22 characters"));
}

#[test]
fn report_on_sample_json() {
    let json = run_json(&["report", "--json"]);

    assert_eq!(json["approximate_word_count"], 739);
    assert_eq!(json["most_common"]["word"], "the");
    assert_eq!(json["most_common"]["occurrences"], 54);
    assert_eq!(json["paragraphs"], 19);
    assert_eq!(json["sentences"], 48);

    let counts: Vec<(String, u64)> = json["word_counts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["word"].as_str().unwrap().to_string(),
                c["count"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Apple".to_string(), 16),
            ("pie".to_string(), 21),
            ("ACME".to_string(), 10),
            ("technology".to_string(), 7),
            ("baking".to_string(), 11),
            ("zxyz".to_string(), 0),
        ]
    );
}

#[test]
fn report_word_flag_replaces_demo_words() {
    let json = run_json(&["report", "--json", "--word", "crust,ACME", "-w", "oven"]);

    let words: Vec<&str> = json["word_counts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["word"].as_str().unwrap())
        .collect();
    assert_eq!(words, vec!["crust", "ACME", "oven"]);
}

#[test]
fn report_metrics_flag_limits_output() {
    let json = run_json(&["report", "--json", "--metrics", "paragraphs,sentences"]);

    assert_eq!(json["paragraphs"], 19);
    assert_eq!(json["sentences"], 48);
    assert!(json.get("word_counts").is_none());
    assert!(json.get("most_common").is_none());
    assert!(json.get("average_word_length").is_none());
}

#[test]
fn report_rejects_unknown_metric() {
    cmd()
        .args(["report", "--metrics", "syllables"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn report_on_file() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "The cat sat.\n\nThe dog ran. The end!").unwrap();

    let json = run_json(&[
        "report",
        tmp.path().to_str().unwrap(),
        "--json",
        "--word",
        "the",
    ]);

    assert_eq!(json["word_counts"][0]["count"], 3);
    assert_eq!(json["most_common"]["word"], "the");
    assert_eq!(json["paragraphs"], 2);
    assert_eq!(json["sentences"], 3);
}

#[test]
fn report_on_stdin() {
    let output = cmd()
        .args(["report", "-", "--json"])
        .write_stdin("One line. Another line!")
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sentences"], 2);
    assert_eq!(json["paragraphs"], 1);
    assert_eq!(json["most_common"]["word"], "line");
}

#[test]
fn report_on_empty_stdin_uses_floors() {
    let output = cmd()
        .args(["report", "-", "--json"])
        .write_stdin("")
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["most_common"]["word"].is_null());
    assert_eq!(json["average_word_length"].as_f64(), Some(0.0));
    assert_eq!(json["paragraphs"], 1);
    assert_eq!(json["sentences"], 1);
}

#[test]
fn report_strips_markdown_files() {
    let tmp = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
    std::fs::write(
        tmp.path(),
        "# Pie\n\nA pie recipe.\n\n```\npie pie pie pie\n```\n",
    )
    .unwrap();

    let json = run_json(&[
        "report",
        tmp.path().to_str().unwrap(),
        "--json",
        "--word",
        "pie",
    ]);

    assert_eq!(json["word_counts"][0]["count"], 2);
    assert_eq!(json["paragraphs"], 2);
}

#[test]
fn report_missing_file_fails() {
    cmd()
        .args(["report", "/nonexistent/article.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Metric Command
// =============================================================================

#[test]
fn metric_word_count_prints_bare_number() {
    cmd()
        .args(["metric", "word-count", "--word", "pie"])
        .assert()
        .success()
        .stdout(predicate::str::diff("21\n"));
}

#[test]
fn metric_word_count_lists_multiple_words() {
    cmd()
        .args(["metric", "word-count", "--word", "Apple,zxyz"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Apple: 16\nzxyz: 0\n"));
}

#[test]
fn metric_word_count_requires_word() {
    cmd()
        .args(["metric", "word-count"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--word"));
}

#[test]
fn metric_most_common_prints_word() {
    cmd()
        .args(["metric", "most-common"])
        .assert()
        .success()
        .stdout(predicate::str::diff("the\n"));
}

#[test]
fn metric_most_common_prints_none_without_words() {
    cmd()
        .args(["metric", "most-common", "-"])
        .write_stdin("42 ... 7!")
        .assert()
        .success()
        .stdout(predicate::str::diff("none\n"));
}

#[test]
fn metric_average_length_has_two_decimals() {
    cmd()
        .args(["metric", "average-length"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5.22\n"));
}

#[test]
fn metric_paragraphs_and_sentences() {
    cmd()
        .args(["metric", "paragraphs"])
        .assert()
        .success()
        .stdout(predicate::str::diff("19\n"));
    cmd()
        .args(["metric", "sentences"])
        .assert()
        .success()
        .stdout(predicate::str::diff("48\n"));
}

#[test]
fn metric_json_output() {
    let json = run_json(&["metric", "sentences", "--json"]);
    assert_eq!(json["metric"], "sentences");
    assert_eq!(json["value"], 48);

    let json = run_json(&["metric", "word-count", "--json", "--word", "ACME"]);
    assert_eq!(json["metric"], "word-count");
    assert_eq!(json["value"][0]["word"], "ACME");
    assert_eq!(json["value"][0]["count"], 10);
}

#[test]
fn metric_json_keeps_every_requested_word() {
    let json = run_json(&["metric", "word-count", "--json", "-w", "pie,Pie"]);
    let entries = json["value"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["word"], "pie");
    assert_eq!(entries[1]["word"], "Pie");
    assert!(entries.iter().all(|e| e["count"] == 21));
}

// =============================================================================
// Input Limits
// =============================================================================

#[test]
fn oversized_file_is_rejected() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "word ".repeat(100)).unwrap();

    cmd()
        .env("TEXTMETRICS_MAX_INPUT_BYTES", "64")
        .args(["metric", "sentences", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn oversized_stdin_is_rejected() {
    cmd()
        .env("TEXTMETRICS_MAX_INPUT_BYTES", "8")
        .args(["report", "-"])
        .write_stdin("more than eight bytes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn disabled_limit_accepts_large_input() {
    cmd()
        .env("TEXTMETRICS_MAX_INPUT_BYTES", "8")
        .env("TEXTMETRICS_DISABLE_INPUT_LIMIT", "true")
        .args(["metric", "sentences", "-"])
        .write_stdin("more than eight bytes. Two sentences.")
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
