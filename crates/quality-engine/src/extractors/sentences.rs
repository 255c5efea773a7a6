//! Sentence segmentation and noise filtering shared by the readability and
//! redundancy detectors

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Shortest run of text ending in terminal punctuation (or end of text)
    static ref SENTENCE_PATTERN: Regex = Regex::new(r"(?s).+?(?:[.!?]+|$)").unwrap();

    /// Bare enumerators such as `(3)`, `3.` or `12)`
    static ref BARE_ENUMERATOR: Regex = Regex::new(r"^\(?\d+\)?[.)]?$").unwrap();
}

/// Substrings that mark URL-like or markup-like spans
const NOISE_TOKENS: &[&str] = &["http", "www", ".com", "=", "&", "/"];

/// Maps byte offsets of a page to character offsets.
///
/// Regex matches report bytes; issue locations are in characters.
#[derive(Debug, Clone)]
pub struct CharOffsets {
    boundaries: Vec<usize>,
}

impl CharOffsets {
    pub fn new(text: &str) -> Self {
        Self {
            boundaries: text.char_indices().map(|(byte, _)| byte).collect(),
        }
    }

    /// Character index of a byte offset that lies on a char boundary
    pub fn char_index(&self, byte: usize) -> usize {
        match self.boundaries.binary_search(&byte) {
            Ok(index) | Err(index) => index,
        }
    }
}

/// A trimmed sentence with its page-relative position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub start_char: usize,
    pub end_char: usize,
}

impl Sentence<'_> {
    pub fn char_len(&self) -> usize {
        self.end_char - self.start_char
    }
}

/// Split page text into punctuation-terminated spans with surrounding
/// whitespace trimmed off.
pub fn split_sentences<'a>(text: &'a str, offsets: &CharOffsets) -> Vec<Sentence<'a>> {
    SENTENCE_PATTERN
        .find_iter(text)
        .filter_map(|m| {
            let raw = m.as_str();
            let trimmed_start = raw.trim_start();
            let leading = raw.len() - trimmed_start.len();
            let trimmed = trimmed_start.trim_end();
            if trimmed.is_empty() {
                return None;
            }
            let byte_start = m.start() + leading;
            let byte_end = byte_start + trimmed.len();
            Some(Sentence {
                text: trimmed,
                start_char: offsets.char_index(byte_start),
                end_char: offsets.char_index(byte_end),
            })
        })
        .collect()
}

/// Whether a span is too short, too symbolic or too URL-like to judge as prose
pub fn is_noise_sentence(text: &str) -> bool {
    let stripped = text.trim();
    if stripped.is_empty() {
        return true;
    }

    let compact_len = stripped.chars().filter(|c| !c.is_whitespace()).count();
    if stripped.chars().count() < 15 || compact_len < 10 {
        return true;
    }
    if !stripped.chars().any(char::is_alphabetic) {
        return true;
    }
    if BARE_ENUMERATOR.is_match(stripped) {
        return true;
    }

    let lowered = stripped.to_lowercase();
    if NOISE_TOKENS.iter().any(|token| lowered.contains(token)) {
        return true;
    }

    let numbers = stripped.chars().filter(|c| c.is_numeric()).count();
    let symbols = stripped
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    let non_letter_ratio = (numbers + symbols) as f64 / compact_len.max(1) as f64;
    non_letter_ratio > 0.6
}

/// Sentences worth analysing: segmented, then noise filtered
pub fn prose_sentences<'a>(text: &'a str, offsets: &CharOffsets) -> Vec<Sentence<'a>> {
    split_sentences(text, offsets)
        .into_iter()
        .filter(|sentence| !is_noise_sentence(sentence.text))
        .collect()
}
