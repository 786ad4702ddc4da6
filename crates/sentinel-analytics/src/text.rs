//! Keyword normalization for mention text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Everything outside ASCII letters, digits, space and hyphen is dropped.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9 \-]").expect("valid regex"));

/// Indonesian stopword list (the NLTK `indonesian` corpus).
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("../resources/stopwords/indonesian.txt")
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect()
});

#[must_use]
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalizes free text into keyword tokens.
///
/// Strips disallowed characters, lowercases, splits on whitespace and drops
/// stopwords. Token order and duplicates are preserved. Line breaks count as
/// disallowed characters, so words on either side of one are joined.
#[must_use]
pub fn normalize(text: &str) -> Vec<String> {
    let cleaned = DISALLOWED_RE.replace_all(text, "").to_lowercase();
    cleaned
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(str::to_owned)
        .collect()
}
