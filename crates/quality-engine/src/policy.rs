//! Page-context policies applied to raw detector output
//!
//! Detectors judge text in isolation. The policies below revisit every issue
//! with the page profile in hand: repeated wording on consent pages is
//! expected, question grids on forms look like broken prose, and anything
//! found on a page the classifier could not label is only a hint.

use std::collections::HashMap;

use lazy_static::lazy_static;
use quality_types::{
    Category, Issue, IssueKind, Language, NormalizedPage, PageProfile, PageType, Severity, Subtype,
};
use regex::Regex;
use tracing::debug;

use crate::config::PolicyConfig;
use crate::detectors::punctuation::find_bracket_mismatch;
use crate::detectors::redundancy::{BOILERPLATE_SUGGESTION, FORM_REPEAT_SUGGESTION};

/// Logic subtypes that stay actionable on consent and terms pages
pub const ACTIONABLE_ALLOWLIST: &[Subtype] = &[
    Subtype::DateFormatInconsistency,
    Subtype::NumberFormatInconsistency,
];

const UNCERTAIN_SUGGESTION: (&str, &str) = (
    "문맥/타입 판정이 불확실하여 참고용입니다. 원문을 확인하세요.",
    "Context/type is uncertain, so this is for reference only. Please review the original text.",
);

lazy_static! {
    /// Indicators of fill-in sections (skill grids, yes/no columns, periods)
    static ref FORMLIKE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"상\s*/\s*중\s*/\s*하").unwrap(),
        Regex::new(r"해당\s*될\s*경우").unwrap(),
        Regex::new(r"예\s*/?\s*아니오").unwrap(),
        Regex::new(r"군필").unwrap(),
        Regex::new(r"체크").unwrap(),
        Regex::new(r"선택").unwrap(),
        Regex::new(r"기간").unwrap(),
        Regex::new(r"취득일").unwrap(),
        Regex::new(r"[□■○●☐☑]").unwrap(),
        Regex::new(r"(?i)\bO\s*/\s*X\b").unwrap(),
        Regex::new(r"(?i)\byes\s*/\s*no\b").unwrap(),
        Regex::new(r"(?i)\d{4}\s*[./-]\s*\d{1,2}\s*[~～–-]\s*(?:\d{4}\s*[./-]\s*\d{1,2}|현재|present)")
            .unwrap(),
    ];
}

/// Whether a page reads like a form section rather than prose
pub fn is_formlike(text: &str) -> bool {
    FORMLIKE_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}

struct PolicyContext<'a> {
    profiles: HashMap<u32, &'a PageProfile>,
    texts: HashMap<u32, &'a str>,
    language: Language,
    config: &'a PolicyConfig,
}

impl PolicyContext<'_> {
    fn page_text(&self, page: u32) -> &str {
        self.texts.get(&page).copied().unwrap_or_default()
    }
}

/// Copy the page label onto the issue when the issue carries none of its own
fn attach_profile(issue: &mut Issue, profile: &PageProfile, config: &PolicyConfig) {
    let unlabelled = matches!(issue.page_type, None | Some(PageType::Uncertain));
    if unlabelled
        && profile.page_type.is_concrete()
        && profile.confidence >= config.page_type_override_threshold
    {
        issue.page_type = Some(profile.page_type);
    }
    if issue.page_type_confidence.is_none() {
        issue.page_type_confidence = Some(profile.confidence);
    }
}

fn redundancy_policy(issue: &mut Issue, page_type: PageType, language: Language) {
    let (subtype, (ko, en)) = match page_type {
        PageType::Form => (Subtype::FormRepeat, FORM_REPEAT_SUGGESTION),
        PageType::Consent | PageType::Terms => (Subtype::BoilerplateRepeat, BOILERPLATE_SUGGESTION),
        _ => return,
    };
    issue.kind = IssueKind::Note;
    issue.subtype = Some(subtype);
    issue.set_suggestion(ko, en, language);
}

fn logic_policy(issue: &mut Issue, page_type: PageType, page_text: &str) {
    if issue.subtype == Some(Subtype::BracketMismatch) {
        let downgrade = match page_type {
            PageType::Consent | PageType::Terms | PageType::Form => true,
            PageType::Resume => {
                is_formlike(page_text)
                    && find_bracket_mismatch(page_text).is_some_and(|m| m.is_missing_paren_opener())
            }
            _ => false,
        };
        if downgrade {
            issue.kind = IssueKind::Note;
        }
        return;
    }

    let keep_actionable = issue
        .subtype
        .is_some_and(|subtype| ACTIONABLE_ALLOWLIST.contains(&subtype));
    if page_type == PageType::Form || (page_type.is_consent_or_terms() && !keep_actionable) {
        issue.kind = IssueKind::Note;
    }
}

fn apply_policy(mut issue: Issue, ctx: &PolicyContext<'_>) -> Issue {
    let page = issue.location.page();
    if let Some(profile) = ctx.profiles.get(&page) {
        attach_profile(&mut issue, profile, ctx.config);
    }

    if issue
        .page_type_confidence
        .is_some_and(|confidence| confidence < ctx.config.uncertain_threshold)
    {
        issue.page_type = Some(PageType::Uncertain);
    }

    match issue.page_type {
        Some(PageType::Uncertain) => {
            issue.kind = IssueKind::Note;
            issue.subtype = None;
            issue.set_suggestion(UNCERTAIN_SUGGESTION.0, UNCERTAIN_SUGGESTION.1, ctx.language);
            issue.severity = Severity::Green;
            return issue;
        }
        Some(page_type) => match issue.category {
            Category::Redundancy => redundancy_policy(&mut issue, page_type, ctx.language),
            Category::Readability => {
                if matches!(page_type, PageType::Consent | PageType::Terms | PageType::Form) {
                    issue.kind = IssueKind::Note;
                }
            }
            _ => logic_policy(&mut issue, page_type, ctx.page_text(page)),
        },
        None => {}
    }

    if issue.is_note() {
        issue.severity = Severity::Green;
    } else if issue.severity == Severity::Green {
        issue.severity = Severity::Yellow;
    }
    issue
}

/// Reconcile detector output with page profiles.
///
/// Afterwards every issue satisfies `kind == NOTE` exactly when
/// `severity == GREEN`.
pub fn apply_issue_policies(
    issues: Vec<Issue>,
    profiles: &[PageProfile],
    pages: &[NormalizedPage],
    language: Language,
    config: &PolicyConfig,
) -> Vec<Issue> {
    let mut by_page = HashMap::new();
    for profile in profiles {
        by_page.entry(profile.page).or_insert(profile);
    }
    let ctx = PolicyContext {
        profiles: by_page,
        texts: pages
            .iter()
            .map(|page| (page.page_number, page.text.as_str()))
            .collect(),
        language,
        config,
    };

    let before = issues.iter().filter(|issue| issue.is_note()).count();
    let issues: Vec<Issue> = issues
        .into_iter()
        .map(|issue| apply_policy(issue, &ctx))
        .collect();
    debug!(
        total = issues.len(),
        downgraded = issues
            .iter()
            .filter(|issue| issue.is_note())
            .count()
            .saturating_sub(before),
        "issue policies applied"
    );
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::bilingual;
    use crate::detectors::test_support::{page, profile};
    use pretty_assertions::assert_eq;
    use quality_types::Location;

    fn issue(category: Category, subtype: Option<Subtype>, page: u32) -> Issue {
        Issue::new(
            format!("test_p{}", page),
            category,
            Location::new(page, 0, 4).unwrap(),
            bilingual("메시지", "제안", "message", "suggestion"),
            Language::En,
        )
        .with_subtype(subtype)
    }

    fn apply(issues: Vec<Issue>, profiles: &[PageProfile], pages: &[NormalizedPage]) -> Vec<Issue> {
        apply_issue_policies(issues, profiles, pages, Language::En, &PolicyConfig::default())
    }

    fn apply_one(issue: Issue, profile: PageProfile, text: &str) -> Issue {
        let pages = [page(profile.page, text)];
        apply(vec![issue], &[profile], &pages).remove(0)
    }

    #[test]
    fn test_profile_is_attached() {
        let out = apply_one(
            issue(Category::Logic, Some(Subtype::PunctuationAnomaly), 1),
            profile(1, PageType::Report, 0.8),
            "보고서 본문!!",
        );
        assert_eq!(out.page_type, Some(PageType::Report));
        assert_eq!(out.page_type_confidence, Some(0.8));
        assert_eq!(out.kind, IssueKind::Warning);
        assert_eq!(out.severity, Severity::Yellow);
    }

    #[test]
    fn test_detector_label_is_kept() {
        let labelled = issue(Category::Redundancy, None, 1).with_page_type(PageType::Resume, Some(0.9));
        let out = apply_one(labelled, profile(1, PageType::Form, 0.9), "text");
        assert_eq!(out.page_type, Some(PageType::Resume));
        assert_eq!(out.kind, IssueKind::Warning);
    }

    #[test]
    fn test_low_confidence_page_becomes_uncertain() {
        let out = apply_one(
            issue(Category::Spelling, Some(Subtype::CommonEnTypo), 1),
            profile(1, PageType::Consent, 0.2),
            "teh consent",
        );
        assert_eq!(out.page_type, Some(PageType::Uncertain));
        assert_eq!(out.page_type_confidence, Some(0.2));
        assert_eq!(out.kind, IssueKind::Note);
        assert_eq!(out.severity, Severity::Green);
        assert_eq!(out.subtype, None);
        assert_eq!(out.suggestion, UNCERTAIN_SUGGESTION.1);
        assert_eq!(out.i18n.ko.suggestion, UNCERTAIN_SUGGESTION.0);
        assert_eq!(out.message, "message");
    }

    #[test]
    fn test_uncertain_profile_between_thresholds_leaves_issue_alone() {
        let out = apply_one(
            issue(Category::Readability, Some(Subtype::LongSentence), 1),
            profile(1, PageType::Uncertain, 0.38),
            "text",
        );
        assert_eq!(out.page_type, None);
        assert_eq!(out.page_type_confidence, Some(0.38));
        assert_eq!(out.kind, IssueKind::Warning);
    }

    #[test]
    fn test_redundancy_on_form_and_consent_pages() {
        let form = apply_one(
            issue(Category::Redundancy, Some(Subtype::VerbatimDuplicate), 1),
            profile(1, PageType::Form, 0.7),
            "text",
        );
        assert_eq!(form.subtype, Some(Subtype::FormRepeat));
        assert_eq!(form.kind, IssueKind::Note);
        assert_eq!(form.suggestion, FORM_REPEAT_SUGGESTION.1);

        let consent = apply_one(
            issue(Category::Redundancy, Some(Subtype::VerbatimDuplicate), 2),
            profile(2, PageType::Terms, 0.7),
            "text",
        );
        assert_eq!(consent.subtype, Some(Subtype::BoilerplateRepeat));
        assert_eq!(consent.severity, Severity::Green);
        assert_eq!(consent.i18n.ko.suggestion, BOILERPLATE_SUGGESTION.0);
    }

    #[test]
    fn test_readability_is_informational_on_consent() {
        let out = apply_one(
            issue(Category::Readability, Some(Subtype::LongSentence), 1).with_severity(Severity::Red),
            profile(1, PageType::Consent, 0.9),
            "text",
        );
        assert_eq!((out.kind, out.severity), (IssueKind::Note, Severity::Green));
    }

    #[test]
    fn test_allowlisted_logic_stays_actionable_on_consent() {
        let pages = [page(1, "text")];
        let profiles = [profile(1, PageType::Consent, 0.9)];
        let out = apply(
            vec![
                issue(Category::Logic, Some(Subtype::DateFormatInconsistency), 1),
                issue(Category::Logic, Some(Subtype::NumberFormatInconsistency), 1),
                issue(Category::Logic, Some(Subtype::PunctuationAnomaly), 1),
                issue(Category::Spelling, Some(Subtype::CommonKoTypo), 1),
            ],
            &profiles,
            &pages,
        );
        let kinds: Vec<IssueKind> = out.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![IssueKind::Warning, IssueKind::Warning, IssueKind::Note, IssueKind::Note]
        );
    }

    #[test]
    fn test_form_pages_downgrade_everything_logical() {
        let out = apply_one(
            issue(Category::Logic, Some(Subtype::DateFormatInconsistency), 1),
            profile(1, PageType::Form, 0.6),
            "text",
        );
        assert!(out.is_note());
    }

    #[test]
    fn test_resume_bracket_on_formlike_page() {
        let text = "병역: 군필 여부 체크 항목 없음) 경력 기간 기재";
        let out = apply_one(
            issue(Category::Logic, Some(Subtype::BracketMismatch), 1),
            profile(1, PageType::Resume, 0.8),
            text,
        );
        assert_eq!(out.kind, IssueKind::Note);
    }

    #[test]
    fn test_resume_bracket_on_prose_page_stays() {
        let out = apply_one(
            issue(Category::Logic, Some(Subtype::BracketMismatch), 1),
            profile(1, PageType::Resume, 0.8),
            "주요 프로젝트 성과 정리 없음) 이후 내용",
        );
        assert_eq!(out.kind, IssueKind::Warning);

        // form-like, but the mismatch is an unclosed opener
        let out = apply_one(
            issue(Category::Logic, Some(Subtype::BracketMismatch), 1),
            profile(1, PageType::Resume, 0.8),
            "자격증 취득일 (2020년",
        );
        assert_eq!(out.kind, IssueKind::Warning);
    }

    #[test]
    fn test_green_warning_is_raised() {
        let out = apply_one(
            issue(Category::Readability, Some(Subtype::LongSentence), 1).with_severity(Severity::Green),
            profile(1, PageType::Report, 0.9),
            "text",
        );
        assert_eq!((out.kind, out.severity), (IssueKind::Warning, Severity::Yellow));
    }

    #[test]
    fn test_page_without_profile() {
        let out = apply(vec![issue(Category::Logic, None, 3)], &[], &[]).remove(0);
        assert_eq!(out.page_type, None);
        assert_eq!(out.page_type_confidence, None);
        assert_eq!(out.severity, Severity::Yellow);
    }

    #[test]
    fn test_formlike_indicators() {
        assert!(is_formlike("외국어 능력 상/중/하"));
        assert!(is_formlike("해당 될 경우 기재"));
        assert!(is_formlike("☐ 동의함"));
        assert!(is_formlike("Relocation: Yes / No"));
        assert!(is_formlike("근무 2019.03 ~ 2021.02"));
        assert!(is_formlike("Employed 2021-05 - present"));
        assert!(is_formlike("운전 가능 O/X"));
        assert!(!is_formlike("Led the migration to Kotlin and shipped weekly."));
    }
}
