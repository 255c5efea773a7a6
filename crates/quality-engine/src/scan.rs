//! Scan-likelihood of the raw extraction

use quality_types::{PageInput, ScanLevel};

use crate::config::ScanConfig;

/// Text coverage of the raw pages, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSummary {
    pub page_count: usize,
    pub textless_pages: usize,
    pub raw_char_count: usize,
    pub scan_like: bool,
    pub scan_like_ratio: f64,
    pub scan_level: ScanLevel,
}

/// Pages whose trimmed text is shorter than `min_text_len` are treated as
/// images. An empty document is fully scan-like.
pub fn summarize(pages: &[PageInput], config: &ScanConfig) -> ScanSummary {
    let page_count = pages.len();
    let textless_pages = pages
        .iter()
        .filter(|page| page.text().trim().chars().count() < config.min_text_len)
        .count();
    let raw_char_count = pages.iter().map(|page| page.text().chars().count()).sum();

    let scan_like_ratio = if page_count == 0 {
        1.0
    } else {
        textless_pages as f64 / page_count as f64
    };
    let scan_level = if scan_like_ratio >= config.high_threshold {
        ScanLevel::High
    } else if scan_like_ratio >= config.partial_threshold {
        ScanLevel::Partial
    } else {
        ScanLevel::None
    };

    ScanSummary {
        page_count,
        textless_pages,
        raw_char_count,
        scan_like: scan_like_ratio >= config.high_threshold,
        scan_like_ratio,
        scan_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pages(lengths: &[usize]) -> Vec<PageInput> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &len)| PageInput::new(i as u32 + 1, "가".repeat(len)))
            .collect()
    }

    #[test]
    fn test_empty_document_is_scan_like() {
        let summary = summarize(&[], &ScanConfig::default());
        assert_eq!(summary.page_count, 0);
        assert_eq!(summary.scan_like_ratio, 1.0);
        assert!(summary.scan_like);
        assert_eq!(summary.scan_level, ScanLevel::High);
    }

    #[test]
    fn test_text_pages() {
        let summary = summarize(&pages(&[120, 80, 50]), &ScanConfig::default());
        assert_eq!(summary.textless_pages, 0);
        assert_eq!(summary.raw_char_count, 250);
        assert_eq!(summary.scan_level, ScanLevel::None);
        assert!(!summary.scan_like);
    }

    #[test]
    fn test_partial_and_high_levels() {
        let partial = summarize(&pages(&[120, 120, 120, 10]), &ScanConfig::default());
        assert_eq!(partial.textless_pages, 1);
        assert_eq!(partial.scan_like_ratio, 0.25);
        assert_eq!(partial.scan_level, ScanLevel::Partial);

        let high = summarize(&pages(&[120, 0, 49]), &ScanConfig::default());
        assert_eq!(high.textless_pages, 2);
        assert_eq!(high.scan_level, ScanLevel::High);
        assert!(high.scan_like);
    }

    #[test]
    fn test_whitespace_does_not_count_as_text() {
        let page = PageInput::new(1, format!("   {}\n\n   ", "a".repeat(49)));
        let summary = summarize(&[page], &ScanConfig::default());
        assert_eq!(summary.textless_pages, 1);
        assert_eq!(summary.raw_char_count, 57);
    }

    #[test]
    fn test_missing_text_is_textless() {
        let page = PageInput {
            page_number: Some(1),
            text: None,
        };
        let summary = summarize(&[page], &ScanConfig::default());
        assert_eq!(summary.textless_pages, 1);
        assert_eq!(summary.raw_char_count, 0);
    }
}
