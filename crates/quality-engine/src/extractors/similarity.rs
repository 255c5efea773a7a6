//! Fuzzy string similarity and token sets for redundancy detection

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref WORD_TOKEN: Regex = Regex::new(r"[\p{L}\p{N}]+").unwrap();
}

/// Lowercase and collapse whitespace before comparing sentences
pub fn normalize_sentence(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Upper bound of [`fuzzy_ratio`] from the lengths alone
pub fn max_ratio(len_a: usize, len_b: usize) -> f64 {
    if len_a + len_b == 0 {
        return 100.0;
    }
    200.0 * len_a.min(len_b) as f64 / (len_a + len_b) as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut row = vec![0usize; short.len() + 1];
    for &lc in long {
        let mut diagonal = 0;
        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if lc == sc {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[short.len()]
}

/// Normalized insertion/deletion similarity in `0..=100`.
///
/// `100 * (1 - indel_distance / (len_a + len_b))`, where the indel distance
/// is `len_a + len_b - 2 * lcs`. Two empty strings are identical.
pub fn fuzzy_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// Lowercased letter/digit tokens of two or more characters
pub fn token_set(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    WORD_TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}
