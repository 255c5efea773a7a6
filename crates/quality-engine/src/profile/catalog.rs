//! Keyword catalogs for document type classification
//!
//! Weights: 4 = strong, unambiguous phrase; 1-2 = weak or generic term.
//! All entries are lowercase and matched as substrings of lowercased text.
//! Catalog order is significant: matched signals are reported in it.

use lazy_static::lazy_static;
use regex::Regex;

pub type Catalog = &'static [(&'static str, u32)];

pub const CONSENT_STRONG: Catalog = &[
    ("개인정보 처리방침", 4),
    ("제3자 제공", 3),
    ("보유 및 이용 기간", 3),
    ("수집·이용", 3),
    ("수집 이용", 3),
    ("동의서", 3),
    ("고지", 2),
    ("법", 2),
    ("약관", 2),
    ("privacy policy", 4),
    ("third party", 3),
    ("retention period", 3),
    ("consent form", 3),
    ("notice", 2),
    ("law", 2),
    ("terms", 2),
];

pub const CONSENT_WEAK: Catalog = &[("동의", 1), ("consent", 1)];

/// Anchor phrases whose co-occurrence marks a consent notice
pub const CONSENT_ANCHORS: &[&str] = &[
    "개인정보 처리방침",
    "제3자 제공",
    "보유 및 이용 기간",
    "수집·이용",
    "동의서",
    "privacy policy",
    "third party",
    "retention period",
    "consent form",
];

pub const RESUME_STRONG: Catalog = &[
    ("이력서", 4),
    ("자기소개서", 4),
    ("지원서", 3),
    ("성명", 2),
    ("연락처", 2),
    ("학력", 3),
    ("경력", 3),
    ("프로젝트", 3),
    ("기술스택", 3),
    ("자격증", 3),
    ("활동", 2),
    ("경험", 2),
    ("resume", 3),
    ("curriculum vitae", 3),
    ("experience", 2),
    ("education", 2),
    ("skills", 2),
];

/// Resume section headings
pub const RESUME_ANCHORS: &[&str] = &[
    "학력",
    "경력",
    "프로젝트",
    "기술스택",
    "자격증",
    "education",
    "experience",
    "project",
    "skills",
    "certification",
];

pub const TERMS_STRONG: Catalog = &[
    ("약관", 4),
    ("이용약관", 4),
    ("용어의 정의", 4),
    ("목적", 3),
    ("회원", 3),
    ("서비스의 제공", 3),
    ("게시와 개정", 3),
    ("면책", 3),
    ("책임", 3),
    ("서비스", 2),
    ("조건", 2),
    ("terms", 2),
    ("conditions", 2),
    ("liability", 3),
    ("disclaimer", 3),
];

/// Phrases that by themselves mark a terms-of-service document
pub const TERMS_ANCHORS: &[&str] = &["약관", "이용약관", "terms of service", "terms of use"];

pub const FORM_STRONG: Catalog = &[
    ("설문", 3),
    ("설문조사", 3),
    ("점검지", 3),
    ("체크리스트", 3),
    ("문항", 2),
    ("응답", 2),
    ("참여경로", 2),
    ("기타", 1),
    ("survey", 2),
    ("checklist", 2),
    ("questionnaire", 2),
    ("response", 2),
];

pub const FORM_LIKERT: &[&str] = &[
    "매우 아니다",
    "아니다",
    "보통",
    "그렇다",
    "매우 그렇다",
    "strongly disagree",
    "disagree",
    "neutral",
    "agree",
    "strongly agree",
];

pub const REPORT_STRONG: Catalog = &[
    ("보고서", 4),
    ("브리프", 4),
    ("동향", 3),
    ("발간", 2),
    ("백서", 4),
    ("리포트", 3),
    ("brief", 3),
    ("report", 2),
    ("white paper", 3),
    ("issue brief", 3),
    ("trend", 2),
];

pub const REPORT_WEAK: Catalog = &[
    ("요약", 1),
    ("목차", 1),
    ("서론", 1),
    ("결론", 1),
    ("summary", 1),
    ("abstract", 1),
];

/// Signal label recorded for Korean numbered clauses (`제 3 조`)
pub const KO_ARTICLE_SIGNAL: &str = "제N조";
/// Signal label recorded for English numbered clauses (`Article 3`)
pub const EN_ARTICLE_SIGNAL: &str = "article N";

lazy_static! {
    pub static ref KO_ARTICLE_PATTERN: Regex = Regex::new(r"제\s*\d+\s*조").unwrap();
    pub static ref EN_ARTICLE_PATTERN: Regex = Regex::new(r"(?i)\barticle\s+\d+").unwrap();

    /// Checkbox and selection glyphs found on forms
    pub static ref CHECKBOX_PATTERN: Regex = Regex::new(r"[□■○●☑✓]").unwrap();

    /// Lines opening with a question number such as `3.` or `3)`
    pub static ref QUESTION_LINE_PATTERN: Regex = Regex::new(r"(?m)^\s*\d+[.)]").unwrap();
}

/// Every keyword that makes a line worth keeping in a representative excerpt
pub fn excerpt_keywords() -> impl Iterator<Item = &'static str> {
    CONSENT_STRONG
        .iter()
        .chain(CONSENT_WEAK)
        .chain(RESUME_STRONG)
        .chain(TERMS_STRONG)
        .chain(FORM_STRONG)
        .map(|(keyword, _)| *keyword)
}
