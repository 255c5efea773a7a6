//! Tunable thresholds for every pipeline stage.
//!
//! The defaults are empirically tuned. Keyword catalogs are not configurable
//! here, they live as static tables next to the code that reads them.

use quality_types::QualityError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    pub readability: ReadabilityConfig,
    pub redundancy: RedundancyConfig,
    pub punctuation: PunctuationConfig,
    pub spelling: SpellingConfig,
    pub policy: PolicyConfig,
    pub scoring: ScoringConfig,
    pub scan: ScanConfig,
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json_str(json: &str) -> Result<Self, QualityError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| QualityError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), QualityError> {
        let unit_values = [
            ("classifier.uncertain_threshold", self.classifier.uncertain_threshold),
            ("classifier.dominant_threshold", self.classifier.dominant_threshold),
            ("classifier.generic_confidence", self.classifier.generic_confidence),
            (
                "redundancy.consent_confidence_threshold",
                self.redundancy.consent_confidence_threshold,
            ),
            ("policy.uncertain_threshold", self.policy.uncertain_threshold),
            (
                "policy.page_type_override_threshold",
                self.policy.page_type_override_threshold,
            ),
            ("scan.high_threshold", self.scan.high_threshold),
            ("scan.partial_threshold", self.scan.partial_threshold),
        ];
        for (name, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(QualityError::InvalidConfig(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.redundancy.similarity_threshold) {
            return Err(QualityError::InvalidConfig(format!(
                "redundancy.similarity_threshold must be within 0..=100, got {}",
                self.redundancy.similarity_threshold
            )));
        }
        if self.scan.partial_threshold > self.scan.high_threshold {
            return Err(QualityError::InvalidConfig(
                "scan.partial_threshold must not exceed scan.high_threshold".to_string(),
            ));
        }
        self.readability.default.validate("readability.default")?;
        self.readability.resume.validate("readability.resume")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub consent_min_score: u32,
    pub consent_margin: u32,
    /// Added when two or more strong consent anchors co-occur
    pub consent_anchor_boost: u32,
    pub resume_min_score: u32,
    pub resume_anchor_boost_cap: u32,
    pub terms_min_score: u32,
    pub terms_margin: u32,
    pub terms_article_weight: u32,
    pub terms_article_cap: u32,
    pub form_min_score: u32,
    pub form_likert_boost: u32,
    /// Minimum checkbox glyphs / numbered question lines before density counts
    pub form_density_min: u32,
    pub form_density_cap: u32,
    pub report_min_score: u32,
    pub report_margin: u32,
    pub generic_confidence: f64,
    pub uncertain_threshold: f64,
    pub dominant_threshold: f64,
    /// Below this whole-document confidence the dominant type reads MIXED
    pub document_confidence_floor: f64,
    pub document_excerpt_pages: usize,
    pub representative_top_n: usize,
    pub keyword_top_n: usize,
    pub signal_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            consent_min_score: 4,
            consent_margin: 2,
            consent_anchor_boost: 5,
            resume_min_score: 3,
            resume_anchor_boost_cap: 4,
            terms_min_score: 2,
            terms_margin: 2,
            terms_article_weight: 6,
            terms_article_cap: 5,
            form_min_score: 3,
            form_likert_boost: 3,
            form_density_min: 3,
            form_density_cap: 4,
            report_min_score: 3,
            report_margin: 1,
            generic_confidence: 0.2,
            uncertain_threshold: 0.4,
            dominant_threshold: 0.6,
            document_confidence_floor: 0.6,
            document_excerpt_pages: 3,
            representative_top_n: 5,
            keyword_top_n: 6,
            signal_limit: 8,
        }
    }
}

/// Sentence length cutoffs in characters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthThresholds {
    pub long: usize,
    pub yellow: usize,
    pub red: usize,
}

impl LengthThresholds {
    fn validate(&self, name: &str) -> Result<(), QualityError> {
        if self.long <= self.yellow && self.yellow <= self.red {
            Ok(())
        } else {
            Err(QualityError::InvalidConfig(format!(
                "{} must satisfy long <= yellow <= red",
                name
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityConfig {
    pub default: LengthThresholds,
    pub resume: LengthThresholds,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            default: LengthThresholds {
                long: 120,
                yellow: 150,
                red: 200,
            },
            resume: LengthThresholds {
                long: 160,
                yellow: 220,
                red: 280,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedundancyConfig {
    /// Fuzzy ratio (0-100) at which two sentences count as similar
    pub similarity_threshold: f64,
    /// Detection is skipped entirely above this many sentences
    pub max_sentences: usize,
    pub max_lookahead: usize,
    pub consent_confidence_threshold: f64,
}

impl Default for RedundancyConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 90.0,
            max_sentences: 200,
            max_lookahead: 50,
            consent_confidence_threshold: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunctuationConfig {
    pub max_runs_per_page: usize,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            max_runs_per_page: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellingConfig {
    pub max_issues_per_page: usize,
}

impl Default for SpellingConfig {
    fn default() -> Self {
        Self {
            max_issues_per_page: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub uncertain_threshold: f64,
    pub page_type_override_threshold: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            uncertain_threshold: 0.35,
            page_type_override_threshold: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub error_penalty: u32,
    pub warning_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            error_penalty: 10,
            warning_penalty: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Pages with fewer trimmed characters than this count as textless
    pub min_text_len: usize,
    pub high_threshold: f64,
    pub partial_threshold: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_text_len: 50,
            high_threshold: 0.6,
            partial_threshold: 0.2,
        }
    }
}
