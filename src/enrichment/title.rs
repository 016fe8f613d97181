//! Title variants for movie-database searches.
//!
//! Cinema listings decorate titles with presenter credits and format notes
//! that the movie database doesn't know about:
//! - "Carol [4K DCP]" -> "Carol"
//! - "ACE Presents: Carol" -> "Carol"
//!
//! [`variants`] returns the original title first, followed by the cleaned
//! forms in the order they should be tried.

use regex::Regex;
use std::sync::LazyLock;

// Bracketed annotations anywhere in the title: [4K DCP], [35mm]
static BRACKETS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid bracket pattern"));

// Presenter prefix up to and including "Presents:" (case insensitive)
static PRESENTS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*presents:\s*").expect("valid presents pattern"));

/// Remove bracketed annotations.
pub fn strip_brackets(title: &str) -> String {
    BRACKETS_PATTERN.replace_all(title, "").trim().to_string()
}

/// Remove a "<anything> Presents:" prefix.
pub fn strip_presents(title: &str) -> String {
    PRESENTS_PATTERN.replace(title, "").trim().to_string()
}

/// Ordered, duplicate-free search variants for a title.
///
/// Order: original, bracket-stripped, presents-stripped, both stripped.
/// Cleaned forms that are empty or repeat an earlier variant are skipped.
pub fn variants(title: &str) -> Vec<String> {
    let without_brackets = strip_brackets(title);
    let without_presents = strip_presents(title);
    let without_both = strip_presents(&without_brackets);

    let mut result = vec![title.to_string()];
    for candidate in [without_brackets, without_presents, without_both] {
        if !candidate.is_empty() && !result.contains(&candidate) {
            result.push(candidate);
        }
    }
    result
}
