//! Page-level inputs and the normalized page model

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::QualityError;

/// One page as handed over by an external loader (PDF/DOCX/TXT extraction)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub text: Option<String>,
}

impl PageInput {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number: Some(page_number),
            text: Some(text.into()),
        }
    }

    /// Page text, with a missing value read as empty
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// A loaded document: file identity plus its ordered pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub pages: Vec<PageInput>,
}

fn default_file_name() -> String {
    "document".to_string()
}

impl SourceDocument {
    pub fn new(file_name: impl Into<String>, pages: Vec<PageInput>) -> Self {
        Self {
            file_name: file_name.into(),
            pages,
        }
    }

    /// Check every page entry carries a usable, unique page number.
    ///
    /// Returns the page numbers in input order. The engine never guesses a
    /// missing number.
    pub fn validated_page_numbers(&self) -> Result<Vec<u32>, QualityError> {
        let mut seen = HashSet::with_capacity(self.pages.len());
        self.pages
            .iter()
            .enumerate()
            .map(|(index, page)| match page.page_number {
                None => Err(QualityError::MissingPageNumber { index }),
                Some(0) => Err(QualityError::InvalidPageNumber {
                    index,
                    page_number: 0,
                }),
                Some(n) if !seen.insert(n) => Err(QualityError::DuplicatePageNumber {
                    index,
                    page_number: n,
                }),
                Some(n) => Ok(n),
            })
            .collect()
    }
}

/// Canonicalized page text with its position in the virtual concatenation
/// of all pages (pages joined with a 2-character separator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPage {
    pub page_number: u32,
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
}

impl NormalizedPage {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_reads_as_empty() {
        let page: PageInput = serde_json::from_str(r#"{"page_number": 2}"#).unwrap();
        assert_eq!(page.page_number, Some(2));
        assert_eq!(page.text(), "");
    }

    #[test]
    fn test_validation_rejects_missing_page_number() {
        let doc = SourceDocument::new(
            "a.pdf",
            vec![
                PageInput::new(1, "ok"),
                PageInput {
                    page_number: None,
                    text: Some("orphan".into()),
                },
            ],
        );
        assert_eq!(
            doc.validated_page_numbers(),
            Err(QualityError::MissingPageNumber { index: 1 })
        );
    }

    #[test]
    fn test_validation_rejects_page_zero() {
        let doc = SourceDocument::new("a.pdf", vec![PageInput::new(0, "zero")]);
        assert!(matches!(
            doc.validated_page_numbers(),
            Err(QualityError::InvalidPageNumber { index: 0, .. })
        ));
    }

    #[test]
    fn test_validation_rejects_repeated_page_number() {
        let doc = SourceDocument::new(
            "a.pdf",
            vec![
                PageInput::new(1, "first"),
                PageInput::new(2, "second"),
                PageInput::new(1, "again"),
            ],
        );
        assert_eq!(
            doc.validated_page_numbers(),
            Err(QualityError::DuplicatePageNumber {
                index: 2,
                page_number: 1
            })
        );
    }

    #[test]
    fn test_document_defaults_file_name() {
        let doc: SourceDocument =
            serde_json::from_str(r#"{"pages": [{"page_number": 1, "text": "x"}]}"#).unwrap();
        assert_eq!(doc.file_name, "document");
        assert_eq!(doc.validated_page_numbers().unwrap(), vec![1]);
    }
}
