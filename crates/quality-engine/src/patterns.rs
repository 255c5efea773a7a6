//! Keyword matching and snippet helpers shared by the classifier and detectors

/// Maximum length of an evidence string attached to an issue
pub const EVIDENCE_LIMIT: usize = 160;

/// Maximum length of the snippet recorded for a matched earlier sentence
pub const MATCHED_SNIPPET_LIMIT: usize = 80;

/// Truncate to `limit` characters, marking the cut with `...`
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Text around a character index (`radius` characters each side), truncated
/// to the evidence limit
pub fn extract_context(text: &str, char_index: usize, radius: usize) -> String {
    let start = char_index.saturating_sub(radius);
    let window: String = text.chars().skip(start).take(char_index + radius - start).collect();
    truncate(&window, EVIDENCE_LIMIT)
}

/// Keywords found in the lowercased text, in catalog order
pub fn keyword_hits<'a>(text_lower: &str, keywords: &[&'a str]) -> Vec<&'a str> {
    keywords
        .iter()
        .copied()
        .filter(|keyword| text_lower.contains(keyword))
        .collect()
}

/// Number of distinct catalog keywords present in the lowercased text
pub fn count_hits(text_lower: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .count()
}
