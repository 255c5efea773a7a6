//! Document and page type profiles produced by the type classifier

use serde::{Deserialize, Serialize};

/// Type label of a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PageType {
    Consent,
    Terms,
    Resume,
    Form,
    Report,
    Generic,
    Uncertain,
}

impl PageType {
    /// Consent notices and terms of service share most downgrade rules
    pub fn is_consent_or_terms(&self) -> bool {
        matches!(self, PageType::Consent | PageType::Terms)
    }

    pub fn is_concrete(&self) -> bool {
        !matches!(self, PageType::Uncertain)
    }
}

/// Type label of a whole document; never `UNCERTAIN`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    Consent,
    Terms,
    Resume,
    Form,
    Report,
    Generic,
}

impl From<DocumentType> for PageType {
    fn from(doc_type: DocumentType) -> Self {
        match doc_type {
            DocumentType::Consent => PageType::Consent,
            DocumentType::Terms => PageType::Terms,
            DocumentType::Resume => PageType::Resume,
            DocumentType::Form => PageType::Form,
            DocumentType::Report => PageType::Report,
            DocumentType::Generic => PageType::Generic,
        }
    }
}

/// Majority page type across a document, or `MIXED`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DominantType {
    Consent,
    Terms,
    Resume,
    Form,
    Report,
    Generic,
    Mixed,
}

impl From<DocumentType> for DominantType {
    fn from(doc_type: DocumentType) -> Self {
        match doc_type {
            DocumentType::Consent => DominantType::Consent,
            DocumentType::Terms => DominantType::Terms,
            DocumentType::Resume => DominantType::Resume,
            DocumentType::Form => DominantType::Form,
            DocumentType::Report => DominantType::Report,
            DocumentType::Generic => DominantType::Generic,
        }
    }
}

/// Raw per-category classifier scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub consent: u32,
    pub resume: u32,
    pub terms: u32,
    pub form: u32,
    pub report: u32,
}

impl CategoryScores {
    /// Highest and second-highest score, used for the confidence margin
    pub fn top_two(&self) -> (u32, u32) {
        let mut values = [self.consent, self.resume, self.terms, self.form, self.report];
        values.sort_unstable_by(|a, b| b.cmp(a));
        (values[0], values[1])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageProfile {
    pub page: u32,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub confidence: f64,
    #[serde(default)]
    pub signals: Vec<String>,
    #[serde(default)]
    pub scores: CategoryScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentProfile {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub confidence: f64,
    #[serde(default)]
    pub signals: Vec<String>,
    pub dominant_type: DominantType,
}
