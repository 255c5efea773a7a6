//! Span deduplication and the overall score

use std::collections::HashMap;

use quality_types::{Issue, IssueKind, Language, ScanLevel, ScoreConfidence};

use crate::config::ScoringConfig;

const LOW_CONFIDENCE_LIMITATION: (&str, &str) = (
    "텍스트 추출량이 부족하여 점수 산정이 제한됩니다.",
    "Insufficient extracted text limits scoring accuracy.",
);

/// Collapse issues sharing a span into the most severe one.
///
/// Ties keep the issue seen first, and the output keeps the order in which
/// each span first appeared.
pub fn dedup_issues(issues: Vec<Issue>) -> Vec<Issue> {
    let mut slots: HashMap<(u32, usize, usize), usize> = HashMap::new();
    let mut kept: Vec<Issue> = Vec::with_capacity(issues.len());

    for issue in issues {
        let key = issue.location.key();
        match slots.get(&key) {
            Some(&slot) => {
                if issue.severity.rank() > kept[slot].severity.rank() {
                    kept[slot] = issue;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(issue);
            }
        }
    }

    kept
}

/// 100 minus the configured penalty per ERROR and WARNING, floored at 0
pub fn score(issues: &[Issue], config: &ScoringConfig) -> u8 {
    let penalty: u64 = issues
        .iter()
        .map(|issue| match issue.kind {
            IssueKind::Error => u64::from(config.error_penalty),
            IssueKind::Warning => u64::from(config.warning_penalty),
            IssueKind::Note => 0,
        })
        .sum();
    100u64.saturating_sub(penalty) as u8
}

pub fn score_confidence(scan_level: ScanLevel) -> ScoreConfidence {
    ScoreConfidence::from(scan_level)
}

/// Caveats reported next to the score
pub fn limitations(confidence: ScoreConfidence, language: Language) -> Vec<String> {
    match confidence {
        ScoreConfidence::Low => {
            let (ko, en) = LOW_CONFIDENCE_LIMITATION;
            vec![language.pick(ko, en).to_string()]
        }
        ScoreConfidence::High | ScoreConfidence::Med => Vec::new(),
    }
}
