//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the text metrics over MCP so assistants can call them through the
//! stdio transport. Tools are thin wrappers: they check the input size,
//! optionally strip markdown, call into `textmetrics_core`, and return the
//! result as JSON text.

use std::borrow::Cow;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use textmetrics_core::{
    DEFAULT_MAX_INPUT_BYTES, Metric, MostCommonWord, build_report, calculate_average_word_length,
    count_paragraphs, count_sentences, count_specific_word, markdown, most_common_word_frequency,
};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters shared by the single-text tools.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TextParams {
    /// The text to analyze.
    pub text: String,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Parameters for the `count_specific_word` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CountWordParams {
    /// The text to search.
    pub text: String,
    /// The word to count (case-insensitive, whole words only).
    pub word: String,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Parameters for the `text_report` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TextReportParams {
    /// The text to analyze.
    pub text: String,
    /// Words to count. Omit to skip per-word counts.
    pub words: Option<Vec<String>>,
    /// Metrics to include: word-count, most-common, average-length,
    /// paragraphs, sentences. Omit for all.
    pub metrics: Option<Vec<String>>,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
}

#[derive(Serialize)]
struct WordCountOutput<'a> {
    word: &'a str,
    count: usize,
}

/// MCP server exposing the text metrics to AI assistants.
#[derive(Clone)]
pub struct TextMetricsServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input_bytes: Option<usize>,
}

impl Default for TextMetricsServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl TextMetricsServer {
    /// Create a server with the default input limit.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Count whole-word occurrences of a word.
    #[tool(
        description = "Count case-insensitive whole-word occurrences of a word in text. Returns the word and its count."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn count_specific_word(
        &self,
        Parameters(params): Parameters<CountWordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "count_specific_word", "executing MCP tool");

        let text = self.prepare(&params.text, params.strip_markdown)?;
        let count = count_specific_word(&text, &params.word);

        tracing::info!(tool = "count_specific_word", count, "MCP tool completed");
        json_result(&WordCountOutput {
            word: &params.word,
            count,
        })
    }

    /// Find the most frequent word.
    #[tool(
        description = "Find the most frequent word (lowercased). Ties go to the word that appears first. Returns null when the text has no words."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn identify_most_common_word(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "identify_most_common_word", "executing MCP tool");

        let text = self.prepare(&params.text, params.strip_markdown)?;
        let result = MostCommonWord::from(most_common_word_frequency(&text));

        tracing::info!(
            tool = "identify_most_common_word",
            found = result.word.is_some(),
            "MCP tool completed"
        );
        json_result(&result)
    }

    /// Mean word length.
    #[tool(description = "Calculate the average word length in letters. Returns 0 when the text has no words.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn calculate_average_word_length(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "calculate_average_word_length", "executing MCP tool");

        let text = self.prepare(&params.text, params.strip_markdown)?;
        let average = calculate_average_word_length(&text);

        tracing::info!(tool = "calculate_average_word_length", average, "MCP tool completed");
        json_result(&serde_json::json!({ "average_word_length": average }))
    }

    /// Count blank-line separated paragraphs.
    #[tool(description = "Count paragraphs separated by blank lines. Always at least 1.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn count_paragraphs(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "count_paragraphs", "executing MCP tool");

        let text = self.prepare(&params.text, params.strip_markdown)?;
        let paragraphs = count_paragraphs(&text).get();

        tracing::info!(tool = "count_paragraphs", paragraphs, "MCP tool completed");
        json_result(&serde_json::json!({ "paragraphs": paragraphs }))
    }

    /// Count sentences.
    #[tool(description = "Count sentences ended by '.', '!' or '?'. Always at least 1.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn count_sentences(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "count_sentences", "executing MCP tool");

        let text = self.prepare(&params.text, params.strip_markdown)?;
        let sentences = count_sentences(&text).get();

        tracing::info!(tool = "count_sentences", sentences, "MCP tool completed");
        json_result(&serde_json::json!({ "sentences": sentences }))
    }

    /// Run several metrics at once.
    #[tool(
        description = "Run a selection of text metrics (word-count, most-common, average-length, paragraphs, sentences) and return a combined report."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn text_report(
        &self,
        Parameters(params): Parameters<TextReportParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "text_report",
            strip_md = params.strip_markdown,
            metrics = ?params.metrics,
            "executing MCP tool"
        );

        let metrics = params
            .metrics
            .as_deref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| name.parse::<Metric>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let text = self.prepare(&params.text, params.strip_markdown)?;
        let words = params.words.unwrap_or_default();
        let report = build_report(&text, &words, metrics.as_deref());

        tracing::info!(
            tool = "text_report",
            approximate_words = report.approximate_word_count,
            "MCP tool completed"
        );
        json_result(&report)
    }
}

impl TextMetricsServer {
    /// Set the input size limit. `None` disables the check.
    #[must_use]
    pub fn with_max_input_bytes(mut self, max_input_bytes: Option<usize>) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    /// Validate the input size and strip markdown when requested.
    fn prepare<'a>(&self, text: &'a str, strip_markdown: bool) -> Result<Cow<'a, str>, McpError> {
        textmetrics_core::check_input_size(text.len(), self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        Ok(if strip_markdown {
            Cow::Owned(markdown::strip_to_prose(text))
        } else {
            Cow::Borrowed(text)
        })
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_handler]
impl ServerHandler for TextMetricsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use tools to count words, find the most common word, \
                 and measure word length, paragraphs and sentences.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        assert!(!result.is_error.unwrap_or(false));
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    fn text_params(text: &str) -> Parameters<TextParams> {
        Parameters(TextParams {
            text: text.to_string(),
            strip_markdown: false,
        })
    }

    #[test]
    fn server_info_has_correct_name() {
        let server = TextMetricsServer::new();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = TextMetricsServer::new();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let server = TextMetricsServer::new();
        let info = ServerHandler::get_info(&server);

        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = TextMetricsServer::new();
        let params = Parameters(GetInfoParams {
            format: "text".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");

        assert!(!result.is_error.unwrap_or(false));
        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = TextMetricsServer::new();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let json = extract_json(&result);

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn count_specific_word_tool_works() {
        let server = TextMetricsServer::new();
        let params = Parameters(CountWordParams {
            text: "Pie, pie and PIE. No pieces.".to_string(),
            word: "pie".to_string(),
            strip_markdown: false,
        });

        let result = server
            .count_specific_word(params)
            .expect("count_specific_word should succeed");
        let json = extract_json(&result);
        assert_eq!(json["word"], "pie");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn identify_most_common_word_tool_works() {
        let server = TextMetricsServer::new();
        let result = server
            .identify_most_common_word(text_params("the cat and the hat"))
            .expect("identify_most_common_word should succeed");
        let json = extract_json(&result);
        assert_eq!(json["word"], "the");
        assert_eq!(json["occurrences"], 2);
    }

    #[test]
    fn identify_most_common_word_tool_handles_no_words() {
        let server = TextMetricsServer::new();
        let result = server
            .identify_most_common_word(text_params("123 ... !!!"))
            .expect("identify_most_common_word should succeed");
        let json = extract_json(&result);
        assert!(json["word"].is_null());
        assert_eq!(json["occurrences"], 0);
    }

    #[test]
    fn average_length_tool_works() {
        let server = TextMetricsServer::new();
        let result = server
            .calculate_average_word_length(text_params("ab abcd"))
            .expect("calculate_average_word_length should succeed");
        let json = extract_json(&result);
        assert_eq!(json["average_word_length"].as_f64(), Some(3.0));
    }

    #[test]
    fn paragraph_and_sentence_tools_work() {
        let server = TextMetricsServer::new();
        let text = "One. Two!\n\nThree?";

        let paragraphs = server
            .count_paragraphs(text_params(text))
            .expect("count_paragraphs should succeed");
        assert_eq!(extract_json(&paragraphs)["paragraphs"], 2);

        let sentences = server
            .count_sentences(text_params(text))
            .expect("count_sentences should succeed");
        assert_eq!(extract_json(&sentences)["sentences"], 3);
    }

    #[test]
    fn empty_text_keeps_floor_of_one() {
        let server = TextMetricsServer::new();
        let result = server
            .count_sentences(text_params(""))
            .expect("count_sentences should succeed");
        assert_eq!(extract_json(&result)["sentences"], 1);
    }

    #[test]
    fn strip_markdown_drops_code() {
        let server = TextMetricsServer::new();
        let params = Parameters(CountWordParams {
            text: "# Pie\n\n```\npie pie pie\n```\n\nMore pie.".to_string(),
            word: "pie".to_string(),
            strip_markdown: true,
        });

        let result = server
            .count_specific_word(params)
            .expect("count_specific_word should succeed");
        assert_eq!(extract_json(&result)["count"], 2);
    }

    #[test]
    fn text_report_tool_selects_metrics() {
        let server = TextMetricsServer::new();
        let params = Parameters(TextReportParams {
            text: "Apple pie. Apple tart.".to_string(),
            words: Some(vec!["apple".to_string()]),
            metrics: Some(vec!["word-count".to_string(), "sentences".to_string()]),
            strip_markdown: false,
        });

        let result = server
            .text_report(params)
            .expect("text_report should succeed");
        let json = extract_json(&result);
        assert_eq!(json["word_counts"][0]["count"], 2);
        assert_eq!(json["sentences"], 2);
        assert!(json.get("most_common").is_none());
        assert!(json.get("paragraphs").is_none());
    }

    #[test]
    fn text_report_rejects_unknown_metric() {
        let server = TextMetricsServer::new();
        let params = Parameters(TextReportParams {
            text: "text".to_string(),
            words: None,
            metrics: Some(vec!["syllables".to_string()]),
            strip_markdown: false,
        });

        let err = server.text_report(params).unwrap_err();
        assert!(err.message.contains("unknown metric"));
    }

    #[test]
    fn oversized_input_is_rejected() {
        let server = TextMetricsServer::new().with_max_input_bytes(Some(4));
        let err = server.count_paragraphs(text_params("hello")).unwrap_err();
        assert!(err.message.contains("input too large"));

        let unlimited = TextMetricsServer::new().with_max_input_bytes(None);
        assert!(unlimited.count_paragraphs(text_params("hello")).is_ok());
    }
}
