//! Rule-based document quality analysis.
//!
//! Pages go through a fixed pipeline: normalization, page classification,
//! the detector set, page-context policies, span deduplication and scoring.

pub mod config;
pub mod detectors;
pub mod extractors;
pub mod normalize;
pub mod patterns;
pub mod policy;
pub mod profile;
pub mod scan;
pub mod scoring;

pub use config::EngineConfig;
pub use quality_types::{Language, PageInput, QualityError, Report, SourceDocument};

use quality_types::{DocumentMeta, ScoreConfidence};
use tracing::{debug, info};

use crate::detectors::DetectorContext;

/// QualityEngine entry point
#[derive(Debug, Clone, Default)]
pub struct QualityEngine {
    config: EngineConfig,
}

impl QualityEngine {
    pub fn new(config: EngineConfig) -> Result<Self, QualityError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one document and build its report.
    ///
    /// Fails only on malformed input; blank pages are scored as textless.
    pub fn analyze(
        &self,
        document: &SourceDocument,
        language: Language,
    ) -> Result<Report, QualityError> {
        let page_numbers = document.validated_page_numbers()?;
        let scan = scan::summarize(&document.pages, &self.config.scan);

        let normalized = normalize::normalize_pages(
            page_numbers
                .iter()
                .copied()
                .zip(document.pages.iter().map(|page| page.text())),
        );
        debug!(
            file_name = %document.file_name,
            pages = normalized.pages.len(),
            chars = normalized.normalized_char_count,
            "pages normalized"
        );

        let page_profiles = profile::classify_pages(&normalized.pages, &self.config.classifier);
        let ctx = DetectorContext::new(&normalized.pages, &page_profiles, language, &self.config);
        let candidates = detectors::run_all(&ctx);
        let document_profile =
            profile::classify_document(&normalized.pages, &page_profiles, &self.config.classifier);

        let candidate_count = candidates.len();
        let issues = policy::apply_issue_policies(
            candidates,
            &page_profiles,
            &normalized.pages,
            language,
            &self.config.policy,
        );
        let issues = scoring::dedup_issues(issues);

        let raw_score = scoring::score(&issues, &self.config.scoring);
        let score_confidence = scoring::score_confidence(scan.scan_level);
        let overall_score = match score_confidence {
            ScoreConfidence::Low => None,
            ScoreConfidence::High | ScoreConfidence::Med => Some(raw_score),
        };
        info!(
            file_name = %document.file_name,
            candidates = candidate_count,
            issues = issues.len(),
            raw_score,
            ?score_confidence,
            "document analyzed"
        );

        let document_meta = DocumentMeta {
            file_name: document.file_name.clone(),
            page_count: scan.page_count,
            textless_pages: scan.textless_pages,
            raw_char_count: scan.raw_char_count,
            normalized_char_count: normalized.normalized_char_count,
            scan_like: scan.scan_like,
            scan_like_ratio: scan.scan_like_ratio,
            scan_level: scan.scan_level,
            document_profile,
            page_profiles,
        };

        Report::new(
            document_meta,
            score_confidence,
            raw_score,
            overall_score,
            scoring::limitations(score_confidence, language),
            issues,
        )
    }
}

/// Analyze loose pages with the default configuration
pub fn analyze(pages: &[PageInput], language: Language) -> Result<Report, QualityError> {
    let document = SourceDocument::new("document", pages.to_vec());
    QualityEngine::default().analyze(&document, language)
}
