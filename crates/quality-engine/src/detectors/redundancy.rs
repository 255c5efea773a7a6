//! Near-duplicate sentence detection
//!
//! Sentences from all pages are compared pairwise inside a sliding window.
//! A similar pair is reported at the later sentence; the subtype depends on
//! the page type and on whether the pair reads as a copy, as deliberate
//! boilerplate, or as the same statement with different facts.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use quality_types::{Category, Issue, IssueKind, MatchedTo, PageType, Severity, Subtype};
use regex::Regex;
use tracing::debug;

use super::{bilingual, issue_id, locate, DetectorContext};
use crate::extractors::{
    fuzzy_ratio, max_ratio, normalize_sentence, prose_sentences, token_set, CharOffsets,
};
use crate::patterns::{count_hits, truncate, EVIDENCE_LIMIT, MATCHED_SNIPPET_LIMIT};

/// Words typical of legal/consent boilerplate
const BOILERPLATE_KEYWORDS: &[&str] = &[
    "개인정보",
    "동의",
    "제3자",
    "보유",
    "이용",
    "수집",
    "고지",
    "처리방침",
    "약관",
    "법",
    "privacy",
    "consent",
    "third party",
    "retention",
    "notice",
    "terms",
];

const TECH_KEYWORDS: &[&str] = &[
    "자바",
    "스프링",
    "파이썬",
    "리액트",
    "도커",
    "쿠버네티스",
    "aws",
    "java",
    "kotlin",
    "mysql",
    "postgresql",
    "postgres",
    "oracle",
    "mssql",
    "sqlserver",
    "jsp",
    "spring",
    "springboot",
    "spring-boot",
    "react",
    "docker",
    "kubernetes",
    "node",
    "nodejs",
    "javascript",
    "typescript",
    "python",
];

const BOILERPLATE_MIN_HITS: usize = 2;
const VERBATIM_RATIO: f64 = 98.0;
const VERBATIM_MAX_TOKEN_DIFF: usize = 1;
const INCONSISTENCY_MAX_RATIO: f64 = 97.0;
const INCONSISTENCY_MIN_SHARED: usize = 3;

lazy_static! {
    static ref KO_CAPABILITY: Regex = Regex::new(r"(할\s*수\s*있|수\s*있|가능하)").unwrap();
    static ref EN_CAPABILITY: Regex = Regex::new(r"\b(can|able to|be able to)\b").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref LATIN_TOKEN: Regex = Regex::new(r"[A-Za-z][A-Za-z0-9.+#-]*").unwrap();
    static ref DOTTED_NUMBER: Regex = Regex::new(r"\d+(?:[./-]\d+)+").unwrap();
    static ref NUMBER: Regex = Regex::new(r"\d+").unwrap();
}

/// Identifiers, versions and multi-digit numbers: the tokens that carry facts
fn key_tokens(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    let mut tokens: BTreeSet<String> = LATIN_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    tokens.extend(DOTTED_NUMBER.find_iter(text).map(|m| m.as_str().to_string()));
    tokens.extend(
        NUMBER
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|digits| digits.chars().count() >= 2)
            .map(str::to_string),
    );
    tokens.extend(
        TECH_KEYWORDS
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .map(|keyword| keyword.to_string()),
    );
    tokens
}

fn is_capability_statement(text: &str) -> bool {
    let compact = WHITESPACE.replace_all(text, "");
    KO_CAPABILITY.is_match(&compact) || EN_CAPABILITY.is_match(&text.to_lowercase())
}

fn is_meaningful_token(token: &str) -> bool {
    token.chars().any(char::is_numeric) || TECH_KEYWORDS.contains(&token)
}

fn symmetric_difference_len(a: &BTreeSet<String>, b: &BTreeSet<String>) -> usize {
    a.symmetric_difference(b).count()
}

fn severity_for_ratio(ratio: f64) -> Severity {
    if ratio >= 98.0 {
        Severity::Red
    } else if ratio >= 95.0 {
        Severity::Yellow
    } else {
        Severity::Green
    }
}

/// A prose sentence with everything the pair rules look at
struct Candidate<'a> {
    page: u32,
    start_char: usize,
    end_char: usize,
    text: &'a str,
    normalized: String,
    normalized_len: usize,
    tokens: BTreeSet<String>,
    keys: BTreeSet<String>,
    capability: bool,
    boilerplate_hits: usize,
}

impl<'a> Candidate<'a> {
    fn new(page: u32, start_char: usize, end_char: usize, text: &'a str) -> Self {
        let normalized = normalize_sentence(text);
        Self {
            page,
            start_char,
            end_char,
            text,
            normalized_len: normalized.chars().count(),
            normalized,
            tokens: token_set(text),
            keys: key_tokens(text),
            capability: is_capability_statement(text),
            boilerplate_hits: count_hits(&text.to_lowercase(), BOILERPLATE_KEYWORDS),
        }
    }
}

fn is_verbatim(ratio: f64, earlier: &Candidate<'_>, later: &Candidate<'_>) -> bool {
    ratio >= VERBATIM_RATIO
        && symmetric_difference_len(&earlier.tokens, &later.tokens) <= VERBATIM_MAX_TOKEN_DIFF
}

/// Same sentence shape, different facts (versions, dates, tech names)
fn is_inconsistency(
    ratio: f64,
    earlier: &Candidate<'_>,
    later: &Candidate<'_>,
    threshold: f64,
) -> bool {
    if ratio < threshold || ratio > INCONSISTENCY_MAX_RATIO {
        return false;
    }
    if earlier.tokens.is_empty() || later.tokens.is_empty() {
        return false;
    }
    if earlier.keys.is_empty() || later.keys.is_empty() {
        return false;
    }
    if earlier.capability || later.capability {
        return false;
    }
    if earlier.boilerplate_hits.max(later.boilerplate_hits) >= BOILERPLATE_MIN_HITS {
        return false;
    }
    let meaningful_diff = earlier
        .keys
        .symmetric_difference(&later.keys)
        .any(|token| is_meaningful_token(token));
    if !meaningful_diff {
        return false;
    }
    earlier.tokens.intersection(&later.tokens).count() >= INCONSISTENCY_MIN_SHARED
}

struct Verdict {
    kind: IssueKind,
    subtype: Option<Subtype>,
    suggestion: (&'static str, &'static str),
}

const MERGE_SUGGESTION: (&str, &str) = (
    "중복 내용을 제거하거나 병합하세요.",
    "Remove or merge duplicated content.",
);
pub(crate) const FORM_REPEAT_SUGGESTION: (&str, &str) = (
    "양식/문항 반복 구조일 수 있으니, 의도 여부만 점검하세요.",
    "This may be a repeated form/question pattern. Verify whether repetition is intended.",
);
pub(crate) const BOILERPLATE_SUGGESTION: (&str, &str) = (
    "동일 문구 의도 여부만 점검하세요.",
    "Check whether identical wording is intended.",
);

fn classify_pair(
    ratio: f64,
    earlier: &Candidate<'_>,
    later: &Candidate<'_>,
    page_type: PageType,
    page_confidence: Option<f64>,
    ctx: &DetectorContext<'_>,
) -> Verdict {
    let config = &ctx.config.redundancy;
    let consent_like = page_type.is_consent_or_terms()
        && page_confidence.map_or(true, |c| c >= config.consent_confidence_threshold);

    let mut verdict = if page_type == PageType::Form {
        Verdict {
            kind: IssueKind::Note,
            subtype: Some(Subtype::FormRepeat),
            suggestion: FORM_REPEAT_SUGGESTION,
        }
    } else if consent_like {
        Verdict {
            kind: IssueKind::Note,
            subtype: Some(Subtype::BoilerplateRepeat),
            suggestion: BOILERPLATE_SUGGESTION,
        }
    } else if is_verbatim(ratio, earlier, later) {
        Verdict {
            kind: IssueKind::Warning,
            subtype: Some(Subtype::VerbatimDuplicate),
            suggestion: MERGE_SUGGESTION,
        }
    } else if page_type == PageType::Resume
        && is_inconsistency(ratio, earlier, later, config.similarity_threshold)
    {
        Verdict {
            kind: IssueKind::Warning,
            subtype: Some(Subtype::Inconsistency),
            suggestion: (
                "표현/용어(기술 스택) 일관성 확인",
                "Check terminology/tech stack consistency.",
            ),
        }
    } else if page_type == PageType::Resume {
        Verdict {
            kind: IssueKind::Note,
            subtype: None,
            suggestion: (
                "의도적 반복일 수 있습니다. 표현/용어 통일 여부만 점검하세요.",
                "This may be intentional repetition. Check wording/terminology consistency.",
            ),
        }
    } else {
        Verdict {
            kind: IssueKind::Warning,
            subtype: None,
            suggestion: MERGE_SUGGESTION,
        }
    };

    if page_type == PageType::Uncertain {
        verdict.kind = IssueKind::Note;
        verdict.subtype = None;
    }
    verdict
}

/// Report sentences that closely repeat one of the preceding sentences
pub fn detect(ctx: &DetectorContext<'_>) -> Vec<Issue> {
    let config = &ctx.config.redundancy;

    let offsets: Vec<CharOffsets> = ctx.pages.iter().map(|p| CharOffsets::new(&p.text)).collect();
    let candidates: Vec<Candidate<'_>> = ctx
        .pages
        .iter()
        .zip(&offsets)
        .flat_map(|(page, offsets)| {
            prose_sentences(&page.text, offsets)
                .into_iter()
                .map(move |s| Candidate::new(page.page_number, s.start_char, s.end_char, s.text))
        })
        .collect();

    if candidates.len() > config.max_sentences {
        debug!(
            sentences = candidates.len(),
            limit = config.max_sentences,
            "too many sentences, redundancy check skipped"
        );
        return Vec::new();
    }

    let mut issues = Vec::new();
    for (i, earlier) in candidates.iter().enumerate() {
        let window_end = candidates.len().min(i + 1 + config.max_lookahead);
        for later in &candidates[i + 1..window_end] {
            if max_ratio(earlier.normalized_len, later.normalized_len)
                < config.similarity_threshold
            {
                continue;
            }
            let ratio = fuzzy_ratio(&earlier.normalized, &later.normalized);
            if ratio < config.similarity_threshold {
                continue;
            }

            let profile = ctx.profile(later.page);
            let page_type = profile.map_or(PageType::Generic, |p| p.page_type);
            let page_confidence = profile.map(|p| p.confidence);

            let (Some(location), Some(matched)) = (
                locate(later.page, later.start_char, later.end_char),
                locate(earlier.page, earlier.start_char, earlier.end_char),
            ) else {
                continue;
            };

            let verdict = classify_pair(ratio, earlier, later, page_type, page_confidence, ctx);
            let (ko_suggestion, en_suggestion) = verdict.suggestion;
            let i18n = bilingual(
                format!("문장이 다른 문장과 매우 유사합니다 (유사도 {:.0}).", ratio),
                ko_suggestion,
                format!("Sentence is very similar to another sentence (similarity {:.0}).", ratio),
                en_suggestion,
            );

            issues.push(
                Issue::new(
                    issue_id("redundancy", "similar", later.page, later.start_char),
                    Category::Redundancy,
                    location,
                    i18n,
                    ctx.language,
                )
                .with_kind(verdict.kind)
                .with_subtype(verdict.subtype)
                .with_severity(severity_for_ratio(ratio))
                .with_evidence(truncate(later.text, EVIDENCE_LIMIT))
                .with_confidence(ratio / 100.0)
                .with_redundancy(
                    ratio / 100.0,
                    MatchedTo::new(&matched, truncate(earlier.text, MATCHED_SNIPPET_LIMIT)),
                )
                .with_page_type(page_type, page_confidence),
            );
        }
    }

    issues
}
