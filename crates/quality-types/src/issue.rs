//! Issue model: the unit emitted by every detector

use serde::{Deserialize, Serialize};

use crate::error::QualityError;
use crate::profile::PageType;
use crate::types::{Category, Detector, IssueKind, Language, Severity, Subtype};

/// Page-relative character span. `end_char >= start_char` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LocationRepr")]
pub struct Location {
    page: u32,
    start_char: usize,
    end_char: usize,
}

#[derive(Deserialize)]
struct LocationRepr {
    page: u32,
    start_char: usize,
    end_char: usize,
}

impl TryFrom<LocationRepr> for Location {
    type Error = QualityError;

    fn try_from(repr: LocationRepr) -> Result<Self, Self::Error> {
        Location::new(repr.page, repr.start_char, repr.end_char)
    }
}

impl Location {
    pub fn new(page: u32, start_char: usize, end_char: usize) -> Result<Self, QualityError> {
        if page == 0 || end_char < start_char {
            return Err(QualityError::InvalidLocation {
                page,
                start_char,
                end_char,
            });
        }
        Ok(Self {
            page,
            start_char,
            end_char,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn start_char(&self) -> usize {
        self.start_char
    }

    pub fn end_char(&self) -> usize {
        self.end_char
    }

    /// Key used by the deduplicator
    pub fn key(&self) -> (u32, usize, usize) {
        (self.page, self.start_char, self.end_char)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueText {
    pub message: String,
    pub suggestion: String,
}

impl IssueText {
    pub fn new(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Both locale renderings of an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueI18n {
    pub ko: IssueText,
    pub en: IssueText,
}

impl IssueI18n {
    pub fn new(ko: IssueText, en: IssueText) -> Self {
        Self { ko, en }
    }

    pub fn select(&self, language: Language) -> &IssueText {
        match language {
            Language::Ko => &self.ko,
            Language::En => &self.en,
        }
    }
}

/// The earlier sentence a redundancy issue was matched against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedTo {
    pub page: u32,
    pub start_char: usize,
    pub end_char: usize,
    pub snippet: String,
}

impl MatchedTo {
    pub fn new(location: &Location, snippet: impl Into<String>) -> Self {
        Self {
            page: location.page(),
            start_char: location.start_char(),
            end_char: location.end_char(),
            snippet: snippet.into(),
        }
    }
}

/// Fields only the redundancy detector fills in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedundancyMatch {
    pub similarity: f64,
    pub matched_to: MatchedTo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub category: Category,
    pub kind: IssueKind,
    pub subtype: Option<Subtype>,
    pub severity: Severity,
    pub message: String,
    pub evidence: String,
    pub suggestion: String,
    pub location: Location,
    pub confidence: f64,
    pub detector: Detector,
    pub i18n: IssueI18n,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub redundancy: Option<RedundancyMatch>,
    pub page_type: Option<PageType>,
    pub page_type_confidence: Option<f64>,
}

impl Issue {
    /// Start a rule-based WARNING/YELLOW issue; refine with the `with_*` methods.
    pub fn new(
        id: impl Into<String>,
        category: Category,
        location: Location,
        i18n: IssueI18n,
        language: Language,
    ) -> Self {
        let selected = i18n.select(language);
        Self {
            id: id.into(),
            category,
            kind: IssueKind::Warning,
            subtype: None,
            severity: Severity::Yellow,
            message: selected.message.clone(),
            evidence: String::new(),
            suggestion: selected.suggestion.clone(),
            location,
            confidence: 0.5,
            detector: Detector::RuleBased,
            i18n,
            redundancy: None,
            page_type: None,
            page_type_confidence: None,
        }
    }

    pub fn with_kind(mut self, kind: IssueKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_subtype(mut self, subtype: Option<Subtype>) -> Self {
        self.subtype = subtype;
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_redundancy(mut self, similarity: f64, matched_to: MatchedTo) -> Self {
        self.redundancy = Some(RedundancyMatch {
            similarity: similarity.clamp(0.0, 1.0),
            matched_to,
        });
        self
    }

    pub fn with_page_type(mut self, page_type: PageType, confidence: Option<f64>) -> Self {
        self.page_type = Some(page_type);
        self.page_type_confidence = confidence.map(|c| c.clamp(0.0, 1.0));
        self
    }

    /// Overwrite the suggestion in both locales and re-mirror the active one
    pub fn set_suggestion(&mut self, ko: &str, en: &str, language: Language) {
        self.i18n.ko.suggestion = ko.to_string();
        self.i18n.en.suggestion = en.to_string();
        self.suggestion = language.pick(ko, en).to_string();
    }

    pub fn is_note(&self) -> bool {
        self.kind == IssueKind::Note
    }

    pub fn similarity(&self) -> Option<f64> {
        self.redundancy.as_ref().map(|r| r.similarity)
    }
}
