//! Representative excerpt of a page for classification
//!
//! Scoring a whole page lets incidental vocabulary swamp the signal, so pages
//! are classified on a short excerpt: keyword-bearing lines and sentences
//! first, then the longest remaining ones.

use std::collections::HashSet;

use super::catalog::{excerpt_keywords, EN_ARTICLE_PATTERN, KO_ARTICLE_PATTERN};
use crate::extractors::{split_sentences, CharOffsets};

/// Keyword-bearing items shorter than this are ignored
const KEYWORD_ITEM_MIN_CHARS: usize = 12;
/// Plain items shorter than this are ignored unless nothing else is left
const LONG_ITEM_MIN_CHARS: usize = 20;

fn dedup_in_order<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

fn mentions_catalog(item: &str) -> bool {
    let lowered = item.to_lowercase();
    excerpt_keywords().any(|keyword| lowered.contains(keyword))
        || KO_ARTICLE_PATTERN.is_match(item)
        || EN_ARTICLE_PATTERN.is_match(item)
}

/// Build the excerpt: up to `keyword_top_n` keyword items followed by the
/// `longest_top_n` longest items, deduplicated, joined by newlines.
pub fn representative_text(text: &str, keyword_top_n: usize, longest_top_n: usize) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let offsets = CharOffsets::new(text);
    let sentences: Vec<&str> = split_sentences(text, &offsets)
        .into_iter()
        .map(|sentence| sentence.text)
        .collect();

    let items = || lines.iter().chain(sentences.iter()).copied();

    let keyword_items = dedup_in_order(
        items().filter(|item| {
            item.chars().count() >= KEYWORD_ITEM_MIN_CHARS && mentions_catalog(item)
        }),
    );

    let mut candidates: Vec<&str> = items()
        .filter(|item| item.chars().count() >= LONG_ITEM_MIN_CHARS)
        .collect();
    if candidates.is_empty() {
        candidates = if lines.is_empty() {
            vec![text.trim()]
        } else {
            lines.clone()
        };
    }
    let mut longest = dedup_in_order(candidates);
    // stable: equal lengths keep reading order
    longest.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let selected = keyword_items
        .into_iter()
        .take(keyword_top_n)
        .chain(longest.into_iter().take(longest_top_n));
    dedup_in_order(selected).join("\n")
}
