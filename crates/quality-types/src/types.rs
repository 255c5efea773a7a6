use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QualityError;

/// Output locale of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }

    /// Pick the variant of a bilingual pair that matches this locale
    pub fn pick<'a>(&self, ko: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Ko => ko,
            Language::En => en,
        }
    }
}

impl FromStr for Language {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" => Ok(Language::Ko),
            "en" => Ok(Language::En),
            other => Err(QualityError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Display-priority tier of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Red,
    Yellow,
    Green,
}

impl Severity {
    /// Ordering used when collapsing issues on the same span (higher wins)
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Red => 3,
            Severity::Yellow => 2,
            Severity::Green => 1,
        }
    }
}

/// Actionability tier of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueKind {
    Error,
    Warning,
    Note,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spelling,
    Grammar,
    Readability,
    Logic,
    Redundancy,
}

/// Detector-specific refinement of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subtype {
    LongSentence,
    VerbatimDuplicate,
    Inconsistency,
    BoilerplateRepeat,
    FormRepeat,
    BracketMismatch,
    PunctuationAnomaly,
    BulletFlowBreak,
    DateFormatInconsistency,
    NumberFormatInconsistency,
    SpacingSuspect,
    CommonKoTypo,
    CommonEnTypo,
}

impl Subtype {
    /// Lowercase rule name used inside issue ids
    pub fn slug(&self) -> &'static str {
        match self {
            Subtype::LongSentence => "long_sentence",
            Subtype::VerbatimDuplicate => "verbatim_duplicate",
            Subtype::Inconsistency => "inconsistency",
            Subtype::BoilerplateRepeat => "boilerplate_repeat",
            Subtype::FormRepeat => "form_repeat",
            Subtype::BracketMismatch => "bracket_mismatch",
            Subtype::PunctuationAnomaly => "punctuation_anomaly",
            Subtype::BulletFlowBreak => "bullet_flow_break",
            Subtype::DateFormatInconsistency => "date_format_inconsistency",
            Subtype::NumberFormatInconsistency => "number_format_inconsistency",
            Subtype::SpacingSuspect => "spacing_suspect",
            Subtype::CommonKoTypo => "common_ko_typo",
            Subtype::CommonEnTypo => "common_en_typo",
        }
    }
}

/// Provenance of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detector {
    #[default]
    RuleBased,
    /// Reserved for issues produced by external model-assisted passes
    LlmBased,
}

/// How much of the document looks like a scanned image rather than text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanLevel {
    None,
    Partial,
    High,
}

/// Trust tier for the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoreConfidence {
    High,
    Med,
    Low,
}

impl From<ScanLevel> for ScoreConfidence {
    fn from(level: ScanLevel) -> Self {
        match level {
            ScanLevel::None => ScoreConfidence::High,
            ScanLevel::Partial => ScoreConfidence::Med,
            ScanLevel::High => ScoreConfidence::Low,
        }
    }
}
