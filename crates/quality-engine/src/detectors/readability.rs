//! Long sentence detection

use quality_types::{Category, Issue, IssueKind, PageType, Severity, Subtype};

use super::{bilingual, issue_id, locate, DetectorContext};
use crate::config::LengthThresholds;
use crate::extractors::{prose_sentences, CharOffsets};
use crate::patterns::{truncate, EVIDENCE_LIMIT};

const CONFIDENCE: f64 = 0.6;

fn severity_for_length(length: usize, thresholds: &LengthThresholds) -> Severity {
    if length >= thresholds.red {
        Severity::Red
    } else if length >= thresholds.yellow {
        Severity::Yellow
    } else {
        Severity::Green
    }
}

/// Flag prose sentences at or above the long-sentence threshold.
///
/// Resumes get looser thresholds; on consent/terms pages long sentences are
/// expected and only noted.
pub fn detect(ctx: &DetectorContext<'_>) -> Vec<Issue> {
    let config = &ctx.config.readability;
    let mut issues = Vec::new();

    for page in ctx.pages {
        let page_type = ctx.page_type(page.page_number);
        let thresholds = match page_type {
            Some(PageType::Resume) => &config.resume,
            _ => &config.default,
        };
        let kind = match page_type {
            Some(t) if t.is_consent_or_terms() => IssueKind::Note,
            _ => IssueKind::Warning,
        };

        let offsets = CharOffsets::new(&page.text);
        for sentence in prose_sentences(&page.text, &offsets) {
            let length = sentence.char_len();
            if length < thresholds.long {
                continue;
            }
            let Some(location) = locate(page.page_number, sentence.start_char, sentence.end_char)
            else {
                continue;
            };

            let i18n = bilingual(
                format!("긴 문장 감지 ({}자).", length),
                "문장을 더 짧게 분리하세요.",
                format!("Long sentence detected ({} chars).", length),
                "Split the sentence into shorter ones.",
            );
            issues.push(
                Issue::new(
                    issue_id("readability", "long", page.page_number, sentence.start_char),
                    Category::Readability,
                    location,
                    i18n,
                    ctx.language,
                )
                .with_kind(kind)
                .with_subtype(Some(Subtype::LongSentence))
                .with_severity(severity_for_length(length, thresholds))
                .with_evidence(truncate(sentence.text, EVIDENCE_LIMIT))
                .with_confidence(CONFIDENCE),
            );
        }
    }

    issues
}
