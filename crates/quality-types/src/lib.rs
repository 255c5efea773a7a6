pub mod error;
pub mod issue;
pub mod page;
pub mod profile;
pub mod report;
pub mod types;

pub use error::QualityError;
pub use issue::{Issue, IssueI18n, IssueText, Location, MatchedTo, RedundancyMatch};
pub use page::{NormalizedPage, PageInput, SourceDocument};
pub use profile::{CategoryScores, DocumentProfile, DocumentType, DominantType, PageProfile, PageType};
pub use report::{DocumentMeta, Report};
pub use types::{
    Category, Detector, IssueKind, Language, ScanLevel, ScoreConfidence, Severity, Subtype,
};
