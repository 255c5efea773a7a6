use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QualityError {
    #[error("Page entry {index} is missing page_number")]
    MissingPageNumber { index: usize },

    #[error("Page entry {index} has invalid page_number {page_number} (must be >= 1)")]
    InvalidPageNumber { index: usize, page_number: u32 },

    #[error("Page entry {index} repeats page_number {page_number}")]
    DuplicatePageNumber { index: usize, page_number: u32 },

    #[error("Invalid location on page {page}: start_char={start_char}, end_char={end_char}")]
    InvalidLocation {
        page: u32,
        start_char: usize,
        end_char: usize,
    },

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
