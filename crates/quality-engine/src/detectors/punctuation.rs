//! Bracket pairing and repeated punctuation

use lazy_static::lazy_static;
use quality_types::{Category, Issue, Subtype};
use regex::Regex;

use super::{bilingual, issue_id, locate, DetectorContext};
use crate::extractors::CharOffsets;
use crate::patterns::{extract_context, truncate, EVIDENCE_LIMIT};

const CONFIDENCE: f64 = 0.6;
const CONTEXT_RADIUS: usize = 60;
/// Characters before a `)` inspected when deciding whether it closes an enumerator
const ENUM_WINDOW: usize = 12;

pub const BRACKET_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('「', '」'),
    ('『', '』'),
    ('“', '”'),
    ('‘', '’'),
];

lazy_static! {
    /// `!!`, `???`, `...`, `,,,` and longer runs
    static ref PUNCTUATION_RUN: Regex = Regex::new(r"!{2,}|\?{3,}|\.{3,}|,{3,}").unwrap();

    /// Closers of list enumerators such as `3)`, `a)`, `ex)`, `예)` or `가)`
    static ref ENUM_CLOSERS: Vec<Regex> = vec![
        Regex::new(r"\b\d+\s*\)$").unwrap(),
        Regex::new(r"(?i)\b(?:ex|예)\s*\)$").unwrap(),
        Regex::new(r"\b[가-힣]\s*\)$").unwrap(),
        Regex::new(r"\b[A-Za-z]\s*\)$").unwrap(),
    ];
}

fn opener_for(closer: char) -> Option<char> {
    BRACKET_PAIRS
        .iter()
        .find(|(_, c)| *c == closer)
        .map(|(o, _)| *o)
}

fn closer_for(opener: char) -> Option<char> {
    BRACKET_PAIRS
        .iter()
        .find(|(o, _)| *o == opener)
        .map(|(_, c)| *c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// A closer with no matching opener pending
    MissingOpener,
    /// An opener left unclosed at the end of the text
    MissingCloser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketMismatch {
    /// Character index of the offending bracket
    pub index: usize,
    pub kind: MismatchKind,
    pub opener: char,
    pub closer: char,
}

impl BracketMismatch {
    fn hint_ko(&self) -> String {
        match self.kind {
            MismatchKind::MissingOpener => format!("열림 '{}' 누락", self.opener),
            MismatchKind::MissingCloser => format!("닫힘 '{}' 누락", self.closer),
        }
    }

    /// A `)` with no `(` before it, the usual shape of list markers on forms
    pub fn is_missing_paren_opener(&self) -> bool {
        self.kind == MismatchKind::MissingOpener && self.opener == '(' && self.closer == ')'
    }
}

/// Whether the `)` at `idx` ends an enumerator like `3)` rather than a
/// parenthetical. `(3)` still counts as a parenthetical.
fn is_enum_closer(chars: &[char], idx: usize) -> bool {
    let window_start = idx.saturating_sub(ENUM_WINDOW);
    let window: String = chars[window_start..=idx].iter().collect();
    for pattern in ENUM_CLOSERS.iter() {
        let Some(m) = pattern.find(&window) else {
            continue;
        };
        let match_start = window_start + window[..m.start()].chars().count();
        if match_start > 0 && matches!(chars[match_start - 1], '(' | '（') {
            return false;
        }
        return true;
    }
    false
}

/// Scan for the first unbalanced bracket.
///
/// Returns the first closer that does not match the innermost pending
/// opener, or, if the text ends with openers pending, the innermost one.
pub fn find_bracket_mismatch(text: &str) -> Option<BracketMismatch> {
    let chars: Vec<char> = text.chars().collect();
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if closer_for(ch).is_some() {
            stack.push((ch, idx));
            continue;
        }
        let Some(expected) = opener_for(ch) else {
            continue;
        };
        let paren_pending = matches!(stack.last(), Some(('(', _)));
        if ch == ')' && !paren_pending && is_enum_closer(&chars, idx) {
            continue;
        }
        match stack.last() {
            Some(&(top, _)) if top == expected => {
                stack.pop();
            }
            _ => {
                return Some(BracketMismatch {
                    index: idx,
                    kind: MismatchKind::MissingOpener,
                    opener: expected,
                    closer: ch,
                })
            }
        }
    }

    let &(opener, index) = stack.last()?;
    Some(BracketMismatch {
        index,
        kind: MismatchKind::MissingCloser,
        opener,
        closer: closer_for(opener)?,
    })
}

/// First bracket mismatch and every repeated punctuation run on each page
pub fn detect(ctx: &DetectorContext<'_>) -> Vec<Issue> {
    let max_runs = ctx.config.punctuation.max_runs_per_page;
    let mut issues = Vec::new();

    for page in ctx.pages {
        let text = &page.text;
        if page.is_blank() {
            continue;
        }

        if let Some(mismatch) = find_bracket_mismatch(text) {
            if let Some(location) = locate(page.page_number, mismatch.index, mismatch.index + 1) {
                let i18n = bilingual(
                    format!(
                        "문장부호(괄호/인용부호) 짝이 맞지 않는 부분이 있습니다. ({})",
                        mismatch.hint_ko()
                    ),
                    "괄호/인용부호 짝을 확인하세요.",
                    "Bracket/quote pairs appear to be unbalanced.",
                    "Check bracket/quote pairing.",
                );
                issues.push(
                    Issue::new(
                        issue_id("punctuation", "bracket_mismatch", page.page_number, mismatch.index),
                        Category::Logic,
                        location,
                        i18n,
                        ctx.language,
                    )
                    .with_subtype(Some(Subtype::BracketMismatch))
                    .with_evidence(extract_context(text, mismatch.index, CONTEXT_RADIUS))
                    .with_confidence(CONFIDENCE),
                );
            }
        }

        let offsets = CharOffsets::new(text);
        for run in PUNCTUATION_RUN.find_iter(text).take(max_runs) {
            let start = offsets.char_index(run.start());
            let Some(location) = locate(page.page_number, start, offsets.char_index(run.end()))
            else {
                continue;
            };
            let i18n = bilingual(
                "비정상적인 구두점 반복이 있습니다.",
                "구두점 사용을 확인하세요.",
                "Unusual punctuation repetition detected.",
                "Review punctuation usage.",
            );
            issues.push(
                Issue::new(
                    issue_id("punctuation", "punctuation_anomaly", page.page_number, start),
                    Category::Logic,
                    location,
                    i18n,
                    ctx.language,
                )
                .with_subtype(Some(Subtype::PunctuationAnomaly))
                .with_evidence(truncate(run.as_str(), EVIDENCE_LIMIT))
                .with_confidence(CONFIDENCE),
            );
        }
    }

    issues
}
