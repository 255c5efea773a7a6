//! Final quality report

use serde::{Deserialize, Serialize};

use crate::error::QualityError;
use crate::issue::Issue;
use crate::profile::{DocumentProfile, PageProfile};
use crate::types::{IssueKind, ScanLevel, ScoreConfidence, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub file_name: String,
    pub page_count: usize,
    pub textless_pages: usize,
    pub raw_char_count: usize,
    pub normalized_char_count: usize,
    pub scan_like: bool,
    pub scan_like_ratio: f64,
    pub scan_level: ScanLevel,
    pub document_profile: DocumentProfile,
    #[serde(default)]
    pub page_profiles: Vec<PageProfile>,
}

/// Result of one analysis call.
///
/// Only constructible through [`Report::new`] (or deserialization, which runs
/// the same checks), so a report with `score_confidence == LOW` never carries
/// an `overall_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReportRepr")]
pub struct Report {
    document_meta: DocumentMeta,
    score_confidence: ScoreConfidence,
    raw_score: u8,
    overall_score: Option<u8>,
    limitations: Vec<String>,
    issues: Vec<Issue>,
}

#[derive(Deserialize)]
struct ReportRepr {
    document_meta: DocumentMeta,
    score_confidence: ScoreConfidence,
    raw_score: u8,
    overall_score: Option<u8>,
    #[serde(default)]
    limitations: Vec<String>,
    issues: Vec<Issue>,
}

impl TryFrom<ReportRepr> for Report {
    type Error = QualityError;

    fn try_from(repr: ReportRepr) -> Result<Self, Self::Error> {
        Report::new(
            repr.document_meta,
            repr.score_confidence,
            repr.raw_score,
            repr.overall_score,
            repr.limitations,
            repr.issues,
        )
    }
}

impl Report {
    pub fn new(
        document_meta: DocumentMeta,
        score_confidence: ScoreConfidence,
        raw_score: u8,
        overall_score: Option<u8>,
        limitations: Vec<String>,
        issues: Vec<Issue>,
    ) -> Result<Self, QualityError> {
        if raw_score > 100 {
            return Err(QualityError::InvalidReport(format!(
                "raw_score {} is out of range 0..=100",
                raw_score
            )));
        }
        match (score_confidence, overall_score) {
            (ScoreConfidence::Low, Some(score)) => {
                return Err(QualityError::InvalidReport(format!(
                    "overall_score {} must be absent when score_confidence is LOW",
                    score
                )));
            }
            (ScoreConfidence::Low, None) => {}
            (_, Some(score)) if score == raw_score => {}
            (confidence, other) => {
                return Err(QualityError::InvalidReport(format!(
                    "overall_score {:?} must equal raw_score {} when score_confidence is {:?}",
                    other, raw_score, confidence
                )));
            }
        }
        if let Some(issue) = issues
            .iter()
            .find(|issue| (issue.kind == IssueKind::Note) != (issue.severity == Severity::Green))
        {
            return Err(QualityError::InvalidReport(format!(
                "issue {} has kind {:?} with severity {:?}",
                issue.id, issue.kind, issue.severity
            )));
        }

        Ok(Self {
            document_meta,
            score_confidence,
            raw_score,
            overall_score,
            limitations,
            issues,
        })
    }

    pub fn document_meta(&self) -> &DocumentMeta {
        &self.document_meta
    }

    pub fn score_confidence(&self) -> ScoreConfidence {
        self.score_confidence
    }

    pub fn raw_score(&self) -> u8 {
        self.raw_score
    }

    pub fn overall_score(&self) -> Option<u8> {
        self.overall_score
    }

    pub fn limitations(&self) -> &[String] {
        &self.limitations
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
