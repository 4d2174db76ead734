//! Tag-key normalization.
//!
//! A taxonomy key is either a single tag (`rust`) or the multi-tag shorthand
//! `#(a|b|c)`, which names several tags at once.

use regex::Regex;
use std::sync::LazyLock;

/// Anchored multi-tag shorthand: `#(` inner `)`.
static MULTI_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\((.*)\)$").unwrap_or_else(|_| unreachable!()));

/// Resolves a tag-key token into one or more tags.
///
/// No case folding or trimming is applied.
///
/// # Example
///
/// ```rust
/// use hedgedoc_history::taxonomy::tags_from_key;
///
/// assert_eq!(tags_from_key("#(a|b)"), vec!["a", "b"]);
/// assert_eq!(tags_from_key("a"), vec!["a"]);
/// ```
#[must_use]
pub fn tags_from_key(key: &str) -> Vec<String> {
    MULTI_TAG_PATTERN.captures(key).map_or_else(
        || vec![key.to_string()],
        |caps| caps[1].split('|').map(str::to_string).collect(),
    )
}

/// Builds the default heading name for a set of tags.
#[must_use]
pub fn name_from_tags(tags: &[String]) -> String {
    tags.join(", ")
}
