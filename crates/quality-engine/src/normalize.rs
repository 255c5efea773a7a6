//! Page text canonicalization
//!
//! Extracted text arrives with hard line wraps, hyphenated line breaks and
//! ragged whitespace. Detectors expect one paragraph per line, so wrapped
//! lines are rejoined while blank-line paragraph breaks survive.

use lazy_static::lazy_static;
use quality_types::NormalizedPage;
use regex::Regex;

/// Width of the virtual separator placed between consecutive pages
pub const PAGE_SEPARATOR_LEN: usize = 2;

lazy_static! {
    static ref HORIZONTAL_WS_RUN: Regex = Regex::new(r"[\t ]{2,}").unwrap();
    static ref BLANK_LINE_RUN: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Output of [`normalize_pages`]
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    pub pages: Vec<NormalizedPage>,
    pub normalized_char_count: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Join `word-\nword` breaks and turn lone newlines into spaces.
///
/// Both rules look at the neighbours in the input, never at characters
/// already rewritten.
fn rejoin_lines(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let prev = if i > 0 { Some(chars[i - 1]) } else { None };

        if c == '-'
            && chars.get(i + 1) == Some(&'\n')
            && prev.is_some_and(is_word_char)
            && chars.get(i + 2).copied().is_some_and(is_word_char)
        {
            i += 2;
            continue;
        }

        if c == '\n' && prev != Some('\n') && chars.get(i + 1) != Some(&'\n') {
            out.push(' ');
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

/// Canonicalize the text of one page
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let rejoined = rejoin_lines(&unified);
    let collapsed = HORIZONTAL_WS_RUN.replace_all(&rejoined, " ");
    let collapsed = BLANK_LINE_RUN.replace_all(&collapsed, "\n\n");
    collapsed.trim().to_string()
}

/// Normalize every page and place it in the virtual concatenation.
///
/// Offsets count characters, not bytes.
pub fn normalize_pages<'a, I>(pages: I) -> NormalizedDocument
where
    I: IntoIterator<Item = (u32, &'a str)>,
{
    let mut normalized = Vec::new();
    let mut offset = 0usize;

    for (page_number, raw) in pages {
        let text = normalize_text(raw);
        let start_char = offset;
        let end_char = start_char + text.chars().count();
        normalized.push(NormalizedPage {
            page_number,
            text,
            start_char,
            end_char,
        });
        offset = end_char + PAGE_SEPARATOR_LEN;
    }

    NormalizedDocument {
        pages: normalized,
        normalized_char_count: offset.saturating_sub(PAGE_SEPARATOR_LEN),
    }
}
