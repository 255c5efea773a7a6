//! Mixed date and number notation within a page

use std::ops::Range;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use quality_types::{Category, Issue, Subtype};
use regex::{Match, Regex};

use super::{bilingual, issue_id, locate, DetectorContext};
use crate::extractors::CharOffsets;
use crate::patterns::{truncate, EVIDENCE_LIMIT};

const CONFIDENCE: f64 = 0.55;

lazy_static! {
    /// `YYYY-MM-DD`, `YYYY.MM.DD` and `YYYY/MM/DD`, checked in this order
    static ref DATE_STYLES: Vec<Regex> = vec![
        Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap(),
        Regex::new(r"\b(\d{4})\.(\d{2})\.(\d{2})\b").unwrap(),
        Regex::new(r"\b(\d{4})/(\d{2})/(\d{2})\b").unwrap(),
    ];
    static ref COMMA_NUMBER: Regex = Regex::new(r"\b\d{1,3}(?:,\d{3})+\b").unwrap();
    static ref PLAIN_NUMBER: Regex = Regex::new(r"\b\d{4,}\b").unwrap();
}

/// First calendar-valid date written in the given style
fn first_valid_date<'t>(pattern: &Regex, text: &'t str) -> Option<Match<'t>> {
    pattern.captures_iter(text).find_map(|caps| {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?;
        caps.get(0)
    })
}

/// Byte ranges covered by anything shaped like a date, valid or not
fn date_spans(text: &str) -> Vec<Range<usize>> {
    DATE_STYLES
        .iter()
        .flat_map(|pattern| pattern.find_iter(text).map(|m| m.range()))
        .collect()
}

/// Date style mixing: the first date in the second style used on the page
fn find_date_mix(text: &str) -> Option<Match<'_>> {
    let mut used = DATE_STYLES
        .iter()
        .filter_map(|pattern| first_valid_date(pattern, text));
    used.next()?;
    used.next()
}

/// Number grouping mixing: the first bare 4+ digit number on a page that
/// also groups digits with commas. Years inside dates are not numbers.
fn find_number_mix(text: &str) -> Option<Match<'_>> {
    COMMA_NUMBER.find(text)?;
    let dates = date_spans(text);
    PLAIN_NUMBER.find_iter(text).find(|m| {
        !dates
            .iter()
            .any(|span| span.start <= m.start() && m.end() <= span.end)
    })
}

pub fn detect(ctx: &DetectorContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();

    for page in ctx.pages {
        let text = &page.text;
        if page.is_blank() {
            continue;
        }
        let offsets = CharOffsets::new(text);

        let findings = [
            find_date_mix(text).map(|m| {
                (
                    m,
                    Subtype::DateFormatInconsistency,
                    bilingual(
                        "날짜 표기 형식이 혼용된 것 같습니다.",
                        "날짜 표기 형식을 통일해 주세요.",
                        "Date formats appear to be inconsistent.",
                        "Standardize date formatting.",
                    ),
                )
            }),
            find_number_mix(text).map(|m| {
                (
                    m,
                    Subtype::NumberFormatInconsistency,
                    bilingual(
                        "숫자 표기 형식이 혼용된 것 같습니다.",
                        "숫자 표기 형식을 통일해 주세요.",
                        "Number formatting appears inconsistent.",
                        "Standardize number formatting.",
                    ),
                )
            }),
        ];

        for (found, subtype, i18n) in findings.into_iter().flatten() {
            let start = offsets.char_index(found.start());
            let Some(location) = locate(page.page_number, start, offsets.char_index(found.end()))
            else {
                continue;
            };
            issues.push(
                Issue::new(
                    issue_id("consistency", subtype.slug(), page.page_number, start),
                    Category::Logic,
                    location,
                    i18n,
                    ctx.language,
                )
                .with_subtype(Some(subtype))
                .with_evidence(truncate(found.as_str(), EVIDENCE_LIMIT))
                .with_confidence(CONFIDENCE),
            );
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::detectors::test_support::page;
    use pretty_assertions::assert_eq;
    use quality_types::Language;

    fn run(text: &str) -> Vec<Issue> {
        let pages = [page(1, text)];
        let config = EngineConfig::default();
        let ctx = DetectorContext::new(&pages, &[], Language::En, &config);
        detect(&ctx)
    }

    #[test]
    fn test_mixed_date_styles() {
        let issues = run("Signed 2024-03-01, renewed 2024.09.01 and 2025/03/01.");
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.id, "consistency_date_format_inconsistency_p1_27");
        assert_eq!(issue.evidence, "2024.09.01");
        assert_eq!(issue.subtype, Some(Subtype::DateFormatInconsistency));
        assert_eq!(issue.confidence, 0.55);
        assert_eq!(issue.message, "Date formats appear to be inconsistent.");
    }

    #[test]
    fn test_single_date_style_passes() {
        assert!(run("From 2024-03-01 to 2024-09-01.").is_empty());
    }

    #[test]
    fn test_impossible_dates_do_not_count() {
        assert!(run("Version 2024.13.45 released 2024-03-01.").is_empty());
        assert!(run("Build 2023/02/29 shipped 2024-02-29.").is_empty());
    }

    #[test]
    fn test_mixed_number_grouping() {
        let issues = run("Revenue 12,500 units, cost 48000 units.");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].evidence, "48000");
        assert_eq!(issues[0].id, "consistency_number_format_inconsistency_p1_27");
    }

    #[test]
    fn test_years_inside_dates_are_not_bare_numbers() {
        assert!(run("Paid 1,200 on 2024-03-01.").is_empty());
    }

    #[test]
    fn test_offsets_count_characters() {
        let issues = run("금액 1,000 원, 합계 25000 원");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location.start_char(), 15);
        assert_eq!(issues[0].location.end_char(), 20);
    }
}
