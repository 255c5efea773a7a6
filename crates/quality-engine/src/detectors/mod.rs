//! Rule-based issue detectors
//!
//! Every detector is a plain function over the normalized pages. Detectors
//! are independent of each other and never fail; their output is concatenated
//! in [`DETECTORS`] order so issue ids and ordering are reproducible.

pub mod consistency;
pub mod formatting;
pub mod punctuation;
pub mod readability;
pub mod redundancy;
pub mod spelling;

use std::collections::HashMap;

use quality_types::{
    Issue, IssueI18n, IssueText, Language, Location, NormalizedPage, PageProfile, PageType,
};
use tracing::debug;

use crate::config::EngineConfig;

/// Everything a detector may look at
pub struct DetectorContext<'a> {
    pub pages: &'a [NormalizedPage],
    pub language: Language,
    pub config: &'a EngineConfig,
    profiles: HashMap<u32, &'a PageProfile>,
}

impl<'a> DetectorContext<'a> {
    pub fn new(
        pages: &'a [NormalizedPage],
        profiles: &'a [PageProfile],
        language: Language,
        config: &'a EngineConfig,
    ) -> Self {
        let mut by_page = HashMap::new();
        for profile in profiles {
            by_page.entry(profile.page).or_insert(profile);
        }
        Self {
            pages,
            language,
            config,
            profiles: by_page,
        }
    }

    pub fn profile(&self, page: u32) -> Option<&'a PageProfile> {
        self.profiles.get(&page).copied()
    }

    pub fn page_type(&self, page: u32) -> Option<PageType> {
        self.profile(page).map(|profile| profile.page_type)
    }
}

pub type DetectFn = fn(&DetectorContext<'_>) -> Vec<Issue>;

/// Detectors in execution order
pub const DETECTORS: &[(&str, DetectFn)] = &[
    ("readability", readability::detect),
    ("redundancy", redundancy::detect),
    ("punctuation", punctuation::detect),
    ("formatting", formatting::detect),
    ("consistency", consistency::detect),
    ("spelling", spelling::detect),
];

/// Run every detector and concatenate the candidates
pub fn run_all(ctx: &DetectorContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (name, detect) in DETECTORS {
        let found = detect(ctx);
        debug!(detector = *name, count = found.len(), "detector finished");
        issues.extend(found);
    }
    issues
}

/// `<detector>_<rule>_p<page>_<start>`
pub(crate) fn issue_id(detector: &str, rule: &str, page: u32, start: usize) -> String {
    format!("{}_{}_p{}_{}", detector, rule, page, start)
}

pub(crate) fn bilingual(
    ko_message: impl Into<String>,
    ko_suggestion: impl Into<String>,
    en_message: impl Into<String>,
    en_suggestion: impl Into<String>,
) -> IssueI18n {
    IssueI18n::new(
        IssueText::new(ko_message, ko_suggestion),
        IssueText::new(en_message, en_suggestion),
    )
}

/// Spans are built from regex matches on validated pages; a span that still
/// fails validation is dropped rather than reported.
pub(crate) fn locate(page: u32, start_char: usize, end_char: usize) -> Option<Location> {
    Location::new(page, start_char, end_char).ok()
}
