//! Markdown to prose conversion.
//!
//! Uses pulldown-cmark for proper CommonMark parsing rather than regex-based
//! stripping. Block structure is kept as blank-line separated text so the
//! paragraph metric still sees one paragraph per heading, paragraph, list,
//! or table.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Blank line emitted after every prose block.
const BLOCK_BREAK: &str = "\n\n";

/// Strip markdown formatting, returning plain prose text.
///
/// Removes:
/// - YAML frontmatter
/// - Code blocks (fenced and indented)
/// - Inline code
/// - HTML
/// - Emphasis, link, and image markup
///
/// Keeps, each as its own blank-line separated block:
/// - Headings
/// - Paragraphs (including those inside block quotes and list items)
/// - Lists (a tight list stays one block)
/// - Tables (cells joined by spaces, rows by newlines)
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    // pulldown-cmark doesn't know about frontmatter
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut result = String::with_capacity(text.len());
    let mut code_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::End(TagEnd::CodeBlock) => code_depth = code_depth.saturating_sub(1),

            Event::Text(t) if code_depth == 0 => result.push_str(&t),
            Event::SoftBreak | Event::HardBreak => result.push(' '),

            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Table) => {
                end_block(&mut result);
            }
            Event::End(TagEnd::List(_)) => end_block(&mut result),
            Event::End(TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow) => {
                if !result.ends_with('\n') {
                    result.push('\n');
                }
            }
            Event::End(TagEnd::TableCell) => result.push(' '),

            // Inline code, HTML, rules, footnote refs
            _ => {}
        }
    }

    result.trim_end().to_string()
}

/// Terminate the current block with a blank line, without stacking breaks.
fn end_block(result: &mut String) {
    let trimmed = result.trim_end_matches('\n').len();
    result.truncate(trimmed);
    if !result.is_empty() {
        result.push_str(BLOCK_BREAK);
    }
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };

    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    // Skip past the closing `---` and its newline
    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}
