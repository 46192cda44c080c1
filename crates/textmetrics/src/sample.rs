//! Built-in sample text used when no input file is given.

/// A news article about an automated apple pie machine.
pub const NEWS_ARTICLE: &str = include_str!("../data/news_article.txt");

/// Words counted in the sample report when neither `--word` nor the config
/// `words` list is set.
pub const DEMO_WORDS: &[&str] = &["Apple", "pie", "ACME", "technology", "baking", "zxyz"];

/// Returns the demo word list as owned strings.
pub fn demo_words() -> Vec<String> {
    DEMO_WORDS.iter().map(ToString::to_string).collect()
}
