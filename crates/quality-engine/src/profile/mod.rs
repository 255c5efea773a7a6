//! Document and page type classification
//!
//! Each category is scored by summing the weights of catalog keywords found
//! in the text, plus structural boosts (anchor co-occurrence, numbered
//! clauses, Likert scales, checkboxes). A fixed priority ladder then picks the
//! winning type, and the margin between the two best scores becomes the
//! confidence.

pub mod catalog;
pub mod excerpt;

use quality_types::{
    CategoryScores, DocumentProfile, DocumentType, DominantType, NormalizedPage, PageProfile,
    PageType,
};
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::patterns::{count_hits, keyword_hits};
use catalog::*;
pub use excerpt::representative_text;

const CONSENT_ANCHOR_MIN_HITS: usize = 2;
const LIKERT_MIN_HITS: usize = 3;
/// Per-page overrides need this many anchors / numbered clauses
const OVERRIDE_MIN_HITS: usize = 2;

/// Score and matched keywords of one category
#[derive(Debug, Default)]
struct Tally {
    score: u32,
    signals: Vec<&'static str>,
}

impl Tally {
    fn add_catalog(&mut self, text_lower: &str, catalog: Catalog) {
        for &(keyword, weight) in catalog {
            if text_lower.contains(keyword) {
                self.score += weight;
                self.signals.push(keyword);
            }
        }
    }

    fn add_signals(&mut self, signals: impl IntoIterator<Item = &'static str>) {
        for signal in signals {
            if !self.signals.contains(&signal) {
                self.signals.push(signal);
            }
        }
    }
}

/// Raw result of scoring one piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub doc_type: DocumentType,
    pub confidence: f64,
    pub signals: Vec<&'static str>,
    pub scores: CategoryScores,
    /// Distinct consent anchors present
    pub consent_strong_hits: usize,
    /// Numbered clauses (`제N조`, `Article N`)
    pub terms_article_hits: usize,
    pub terms_anchor_hits: usize,
}

/// Score `text` against every catalog and pick a type
pub fn classify_text(text: &str, config: &ClassifierConfig) -> Classification {
    let lower = text.to_lowercase();

    let mut consent = Tally::default();
    consent.add_catalog(&lower, CONSENT_STRONG);
    consent.add_catalog(&lower, CONSENT_WEAK);
    let consent_strong_hits = count_hits(&lower, CONSENT_ANCHORS);
    if consent_strong_hits >= CONSENT_ANCHOR_MIN_HITS {
        consent.score += config.consent_anchor_boost;
        consent.add_signals(keyword_hits(&lower, CONSENT_ANCHORS));
    }

    let mut resume = Tally::default();
    resume.add_catalog(&lower, RESUME_STRONG);
    let resume_anchor_hits = count_hits(&lower, RESUME_ANCHORS) as u32;
    if resume_anchor_hits > 0 {
        resume.score += config.resume_anchor_boost_cap.min(resume_anchor_hits * 2);
        resume.add_signals(keyword_hits(&lower, RESUME_ANCHORS));
    }

    let mut terms = Tally::default();
    terms.add_catalog(&lower, TERMS_STRONG);
    let ko_articles = KO_ARTICLE_PATTERN.find_iter(text).count();
    let en_articles = EN_ARTICLE_PATTERN.find_iter(text).count();
    let terms_article_hits = ko_articles + en_articles;
    let mut terms_anchor_hits = count_hits(&lower, TERMS_ANCHORS);
    if terms_article_hits > 0 {
        let capped = (terms_article_hits as u32).min(config.terms_article_cap);
        terms.score += capped * config.terms_article_weight;
        if ko_articles > 0 {
            terms.add_signals([KO_ARTICLE_SIGNAL]);
        }
        if en_articles > 0 {
            terms.add_signals([EN_ARTICLE_SIGNAL]);
        }
        terms_anchor_hits += 1;
    }

    let mut form = Tally::default();
    form.add_catalog(&lower, FORM_STRONG);
    if count_hits(&lower, FORM_LIKERT) >= LIKERT_MIN_HITS {
        form.score += config.form_likert_boost;
        form.add_signals(keyword_hits(&lower, FORM_LIKERT));
    }
    let density_min = config.form_density_min as usize;
    for hits in [
        CHECKBOX_PATTERN.find_iter(text).count(),
        QUESTION_LINE_PATTERN.find_iter(text).count(),
    ] {
        if hits >= density_min {
            form.score += config.form_density_cap.min(hits as u32);
        }
    }

    let mut report = Tally::default();
    report.add_catalog(&lower, REPORT_STRONG);
    report.add_catalog(&lower, REPORT_WEAK);

    let scores = CategoryScores {
        consent: consent.score,
        resume: resume.score,
        terms: terms.score,
        form: form.score,
        report: report.score,
    };

    let (doc_type, winner) = pick_winner(
        &scores,
        terms_anchor_hits,
        config,
        [consent, resume, terms, form, report],
    );

    let confidence = match doc_type {
        DocumentType::Generic => config.generic_confidence,
        _ => margin_confidence(&scores),
    };

    let mut signals = winner.map(|tally| tally.signals).unwrap_or_default();
    signals.truncate(config.signal_limit);

    Classification {
        doc_type,
        confidence,
        signals,
        scores,
        consent_strong_hits,
        terms_article_hits,
        terms_anchor_hits,
    }
}

/// Priority ladder; the first satisfied rule wins
fn pick_winner(
    s: &CategoryScores,
    terms_anchor_hits: usize,
    config: &ClassifierConfig,
    tallies: [Tally; 5],
) -> (DocumentType, Option<Tally>) {
    let [consent, resume, terms, form, report] = tallies;
    let has_anchor = terms_anchor_hits >= 1;

    if s.consent >= config.consent_min_score
        && s.consent >= max_of(&[s.resume, s.terms, s.form, s.report]) + config.consent_margin
    {
        return (DocumentType::Consent, Some(consent));
    }
    if has_anchor
        && s.terms >= config.terms_min_score
        && s.terms >= max_of(&[s.resume, s.form, s.report]) + config.terms_margin
    {
        return (DocumentType::Terms, Some(terms));
    }
    if s.report >= config.report_min_score
        && s.report >= max_of(&[s.resume, s.form, s.terms]) + config.report_margin
    {
        return (DocumentType::Report, Some(report));
    }
    if s.form >= config.form_min_score && s.form >= s.resume.max(s.terms) {
        return (DocumentType::Form, Some(form));
    }
    if s.resume >= config.resume_min_score && s.resume >= s.terms {
        return (DocumentType::Resume, Some(resume));
    }
    if has_anchor && s.terms >= config.terms_min_score {
        return (DocumentType::Terms, Some(terms));
    }
    if s.report >= config.report_min_score {
        return (DocumentType::Report, Some(report));
    }
    (DocumentType::Generic, None)
}

fn max_of(values: &[u32]) -> u32 {
    values.iter().copied().max().unwrap_or(0)
}

fn margin_confidence(scores: &CategoryScores) -> f64 {
    let (top, second) = scores.top_two();
    let (top, second) = (top as f64, second as f64);
    let margin = (top - second) / (top + second + 1e-6);
    (margin * 1.6 + 0.05).clamp(0.0, 1.0)
}

/// Final page label: low-confidence results become `UNCERTAIN` unless a
/// strong structural signal (consent anchors, numbered clauses) vouches for
/// them, in which case the confidence is floored instead.
pub fn page_label(result: &Classification, config: &ClassifierConfig) -> (PageType, f64) {
    let threshold = config.uncertain_threshold;
    let vouched = match result.doc_type {
        DocumentType::Consent => result.consent_strong_hits >= OVERRIDE_MIN_HITS,
        DocumentType::Terms => result.terms_article_hits >= OVERRIDE_MIN_HITS,
        _ => false,
    };
    if result.confidence >= threshold {
        (result.doc_type.into(), result.confidence)
    } else if vouched {
        (result.doc_type.into(), threshold)
    } else {
        (PageType::Uncertain, result.confidence)
    }
}

/// Classify every page on its representative excerpt
pub fn classify_pages(pages: &[NormalizedPage], config: &ClassifierConfig) -> Vec<PageProfile> {
    pages
        .iter()
        .map(|page| {
            let excerpt =
                representative_text(&page.text, config.keyword_top_n, config.representative_top_n);
            let result = classify_text(&excerpt, config);
            let (page_type, confidence) = page_label(&result, config);
            debug!(
                page = page.page_number,
                ?page_type,
                confidence,
                "classified page"
            );
            PageProfile {
                page: page.page_number,
                page_type,
                confidence,
                signals: result.signals.iter().map(|s| s.to_string()).collect(),
                scores: result.scores,
            }
        })
        .collect()
}

fn dominant_of(page_type: PageType) -> Option<DominantType> {
    match page_type {
        PageType::Consent => Some(DominantType::Consent),
        PageType::Terms => Some(DominantType::Terms),
        PageType::Resume => Some(DominantType::Resume),
        PageType::Form => Some(DominantType::Form),
        PageType::Report => Some(DominantType::Report),
        PageType::Generic => Some(DominantType::Generic),
        PageType::Uncertain => None,
    }
}

/// Confidence-weighted vote over the confidently typed pages
pub fn dominant_type_from_pages(profiles: &[PageProfile], threshold: f64) -> DominantType {
    let mut weights: Vec<(DominantType, f64)> = Vec::new();
    for profile in profiles {
        let Some(vote) = dominant_of(profile.page_type) else {
            continue;
        };
        let weight = profile.confidence.max(0.1);
        match weights.iter_mut().find(|(kind, _)| *kind == vote) {
            Some((_, total)) => *total += weight,
            None => weights.push((vote, weight)),
        }
    }

    // stable: ties keep first-seen order
    weights.sort_by(|a, b| b.1.total_cmp(&a.1));
    match weights.as_slice() {
        [] => DominantType::Generic,
        [(only, _)] => *only,
        [(top, top_weight), (_, second_weight), ..] => {
            let total: f64 = weights.iter().map(|(_, w)| w).sum();
            if top_weight == second_weight || top_weight / total < threshold {
                DominantType::Mixed
            } else {
                *top
            }
        }
    }
}

/// Whole-document profile from the first few pages plus the page vote
pub fn classify_document(
    pages: &[NormalizedPage],
    page_profiles: &[PageProfile],
    config: &ClassifierConfig,
) -> DocumentProfile {
    let head = pages
        .iter()
        .take(config.document_excerpt_pages)
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let result = classify_text(&head, config);

    let mut dominant_type = dominant_type_from_pages(page_profiles, config.dominant_threshold);
    if result.confidence < config.document_confidence_floor {
        dominant_type = DominantType::Mixed;
    }

    DocumentProfile {
        doc_type: result.doc_type,
        confidence: result.confidence,
        signals: result.signals.iter().map(|s| s.to_string()).collect(),
        dominant_type,
    }
}
