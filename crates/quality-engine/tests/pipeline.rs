//! End-to-end properties of the analysis pipeline

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quality_engine::detectors::{redundancy, DetectorContext};
use quality_engine::normalize::normalize_pages;
use quality_engine::policy::apply_issue_policies;
use quality_engine::profile::classify_pages;
use quality_engine::{
    analyze, EngineConfig, Language, PageInput, QualityEngine, QualityError, SourceDocument,
};
use quality_types::{
    Category, DominantType, IssueKind, PageType, Report, ScanLevel, ScoreConfidence, Severity,
    Subtype,
};

const CONSENT_SENTENCE: &str = "본 회사는 개인정보 처리방침에 따라 수집·이용한 개인정보를 제3자 제공 없이 안전하게 \
    보관하며, 보유 및 이용 기간이 끝난 정보는 지체 없이 파기하고 이용자는 언제든지 동의를 철회하여 \
    처리 정지를 요구할 수 있으며 회사는 그 요청을 성실히 처리합니다.";

const CONSENT_PAGE: &str = "개인정보 수집·이용 동의서. 수집하는 개인정보 항목: 성명, 연락처. \
    보유 및 이용 기간: 1년. 제3자 제공에 동의합니다.";

const RESUME_PAGE: &str = "이력서\n\n성명: 홍길동 연락처: 010-1234-5678\n\n학력: 한국대학교 컴퓨터공학과 졸업\n\n\
    경력: ABC 회사 백엔드 개발자 3년\n\n프로젝트: 주문 관리 시스템 개발\n\n기술스택: Java, Spring, MySQL";

fn pages(texts: &[&str]) -> Vec<PageInput> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| PageInput::new(i as u32 + 1, *text))
        .collect()
}

fn assert_report_invariants(report: &Report) {
    assert!(report.raw_score() <= 100);
    assert_eq!(
        report.score_confidence() == ScoreConfidence::Low,
        report.overall_score().is_none()
    );
    let mut keys: Vec<_> = report.issues().iter().map(|i| i.location.key()).collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total, "duplicate spans in report");
    for issue in report.issues() {
        assert_eq!(
            issue.kind == IssueKind::Note,
            issue.severity == Severity::Green,
            "issue {} breaks NOTE/GREEN pairing",
            issue.id
        );
    }
}

#[test]
fn test_identical_consent_sentences_are_boilerplate() {
    assert_eq!(CONSENT_SENTENCE.chars().count(), 140);
    let normalized = normalize_pages([(1, CONSENT_SENTENCE), (2, CONSENT_SENTENCE)]);
    let config = EngineConfig::default();
    let profiles = classify_pages(&normalized.pages, &config.classifier);
    assert!(profiles
        .iter()
        .all(|p| p.page_type == PageType::Consent && p.confidence >= 0.4));

    let ctx = DetectorContext::new(&normalized.pages, &profiles, Language::Ko, &config);
    let found = redundancy::detect(&ctx);
    let issues = apply_issue_policies(found, &profiles, &normalized.pages, Language::Ko, &config.policy);
    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.subtype, Some(Subtype::BoilerplateRepeat));
    assert_eq!(issue.kind, IssueKind::Note);
    assert_eq!(issue.severity, Severity::Green);
    assert_eq!(issue.location.page(), 2);
    assert_eq!(issue.suggestion, "동일 문구 의도 여부만 점검하세요.");
}

#[test]
fn test_overlapping_notes_keep_detector_order() {
    let report = analyze(&pages(&[CONSENT_SENTENCE, CONSENT_SENTENCE]), Language::Ko).unwrap();
    assert_report_invariants(&report);

    // the long-sentence note and the repeat note share page 2's span
    let on_page_two: Vec<_> = report
        .issues()
        .iter()
        .filter(|i| i.location.page() == 2)
        .collect();
    assert_eq!(on_page_two.len(), 1);
    assert_eq!(on_page_two[0].category, Category::Readability);
    assert_eq!(on_page_two[0].severity, Severity::Green);
    assert_eq!(report.overall_score(), Some(100));
}

#[test]
fn test_short_page_with_punctuation_runs() {
    let report = analyze(&pages(&["Hello!!! This is fine. Wait... what??"]), Language::En).unwrap();
    assert_report_invariants(&report);

    let evidence: Vec<&str> = report.issues().iter().map(|i| i.evidence.as_str()).collect();
    assert_eq!(evidence, vec!["!!!", "..."]);
    assert!(report.issues().iter().all(|i| i.category == Category::Logic));

    // 37 characters is below the text floor, so the page reads as a scan
    assert_eq!(report.document_meta().textless_pages, 1);
    assert_eq!(report.score_confidence(), ScoreConfidence::Low);
    assert_eq!(report.overall_score(), None);
    assert_eq!(
        report.limitations(),
        ["Insufficient extracted text limits scoring accuracy.".to_string()]
    );
}

#[test]
fn test_alternating_consent_and_resume_is_mixed() {
    let report = analyze(
        &pages(&[CONSENT_PAGE, RESUME_PAGE, CONSENT_PAGE, RESUME_PAGE]),
        Language::Ko,
    )
    .unwrap();
    let types: Vec<PageType> = report
        .document_meta()
        .page_profiles
        .iter()
        .map(|p| p.page_type)
        .collect();
    assert_eq!(
        types,
        vec![PageType::Consent, PageType::Resume, PageType::Consent, PageType::Resume]
    );
    assert_eq!(
        report.document_meta().document_profile.dominant_type,
        DominantType::Mixed
    );
}

#[test]
fn test_empty_document() {
    let report = analyze(&[], Language::Ko).unwrap();
    assert_eq!(report.raw_score(), 100);
    assert!(report.issues().is_empty());
    assert_eq!(report.document_meta().page_count, 0);
    assert_eq!(report.document_meta().scan_like_ratio, 1.0);
    assert_eq!(report.document_meta().scan_level, ScanLevel::High);
    assert_eq!(report.score_confidence(), ScoreConfidence::Low);
    assert_eq!(report.overall_score(), None);
    assert_eq!(
        report.limitations(),
        ["텍스트 추출량이 부족하여 점수 산정이 제한됩니다.".to_string()]
    );
}

#[test]
fn test_blank_pages_are_not_errors() {
    let report = analyze(&pages(&["", "   \n  "]), Language::En).unwrap();
    assert_eq!(report.document_meta().textless_pages, 2);
    assert_eq!(report.document_meta().normalized_char_count, 2);
    assert!(report.issues().is_empty());
}

#[test]
fn test_zero_page_number_is_rejected() {
    let document = SourceDocument::new("bad.pdf", vec![PageInput::new(0, "text")]);
    let result = QualityEngine::default().analyze(&document, Language::En);
    assert!(matches!(
        result,
        Err(QualityError::InvalidPageNumber {
            index: 0,
            page_number: 0
        })
    ));
}

#[test]
fn test_repeated_page_number_is_rejected() {
    let input = [
        PageInput::new(1, "Hello!!! fine."),
        PageInput::new(1, "Wait... what?? ok"),
    ];
    assert!(matches!(
        analyze(&input, Language::En),
        Err(QualityError::DuplicatePageNumber {
            index: 1,
            page_number: 1
        })
    ));
}

#[test]
fn test_partial_json_config() {
    let config = EngineConfig::from_json_str(r#"{"scoring": {"warning_penalty": 50}}"#).unwrap();
    assert_eq!(config.scoring.error_penalty, 10);
    let engine = QualityEngine::new(config).unwrap();
    assert_eq!(engine.config().scoring.warning_penalty, 50);
}

#[test]
fn test_report_json_round_trip() {
    let input = pages(&[CONSENT_PAGE, RESUME_PAGE, "Teh report was recieved!! 2024-01-02 and 2024.03.04."]);
    let report = analyze(&input, Language::En).unwrap();
    let json = report.to_json().unwrap();
    let parsed: Report = serde_json::from_str(&json).unwrap();

    let ids = |r: &Report| r.issues().iter().map(|i| i.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&parsed), ids(&report));
    assert_eq!(parsed.raw_score(), report.raw_score());
    assert_eq!(parsed.score_confidence(), report.score_confidence());
    assert_eq!(parsed.document_meta().file_name, "document");
}

#[test]
fn test_active_locale_mirrors_i18n() {
    let input = pages(&["Teh parcel arrived late, and the courier left it outside the door!!"]);
    for language in [Language::Ko, Language::En] {
        let report = analyze(&input, language).unwrap();
        assert!(!report.issues().is_empty());
        for issue in report.issues() {
            let text = issue.i18n.select(language);
            assert_eq!(issue.message, text.message);
            assert_eq!(issue.suggestion, text.suggestion);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_analysis_is_deterministic(texts in proptest::collection::vec("[가-힣a-zA-Z0-9 .,!?()\\[\\]\n-]{0,160}", 0..5)) {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let input = pages(&refs);
        let first = analyze(&input, Language::Ko).unwrap();
        let second = analyze(&input, Language::Ko).unwrap();
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        assert_report_invariants(&first);
    }
}
