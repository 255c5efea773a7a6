//! Numbered list continuity

use lazy_static::lazy_static;
use quality_types::{Category, Issue, Subtype};
use regex::Regex;

use super::{bilingual, issue_id, locate, DetectorContext};
use crate::patterns::{truncate, EVIDENCE_LIMIT};

const CONFIDENCE: f64 = 0.5;
/// Fewer numbered lines than this are not treated as a list
const MIN_NUMBERED_LINES: usize = 3;

lazy_static! {
    static ref NUMBERED_LINE: Regex = Regex::new(r"^\s*(\d+)[.)]\s+").unwrap();
}

struct NumberedLine<'a> {
    number: u64,
    start_char: usize,
    text: &'a str,
}

fn numbered_lines(text: &str) -> Vec<NumberedLine<'_>> {
    let mut found = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        let number = NUMBERED_LINE
            .captures(line)
            .and_then(|caps| caps[1].parse::<u64>().ok());
        if let Some(number) = number {
            found.push(NumberedLine {
                number,
                start_char: offset,
                text: line,
            });
        }
        offset += line.chars().count() + 1;
    }
    found
}

/// Flag the first numbered line that does not continue the previous number
pub fn detect(ctx: &DetectorContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();

    for page in ctx.pages {
        if page.is_blank() {
            continue;
        }
        let lines = numbered_lines(&page.text);
        if lines.len() < MIN_NUMBERED_LINES {
            continue;
        }

        let Some(broken) = lines
            .windows(2)
            .find(|pair| pair[0].number.checked_add(1) != Some(pair[1].number))
            .map(|pair| &pair[1])
        else {
            continue;
        };
        let end_char = broken.start_char + broken.text.chars().count();
        let Some(location) = locate(page.page_number, broken.start_char, end_char) else {
            continue;
        };

        let i18n = bilingual(
            "번호/문항 흐름이 끊긴 것 같습니다.",
            "번호 순서가 자연스러운지 확인해 주세요.",
            "Numbered list flow appears to break.",
            "Check the numbering sequence.",
        );
        issues.push(
            Issue::new(
                issue_id("formatting", "bullet_break", page.page_number, broken.start_char),
                Category::Logic,
                location,
                i18n,
                ctx.language,
            )
            .with_subtype(Some(Subtype::BulletFlowBreak))
            .with_evidence(truncate(broken.text, EVIDENCE_LIMIT))
            .with_confidence(CONFIDENCE),
        );
    }

    issues
}
