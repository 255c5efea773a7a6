//! Common misspellings and spacing errors
//!
//! Fixed find/replace tables, applied in order. Korean spacing rules only
//! fire at the end of a word; English rules match whole words regardless of
//! case.

use lazy_static::lazy_static;
use quality_types::{Category, Issue, Subtype};
use regex::Regex;

use super::{bilingual, issue_id, locate, DetectorContext};
use crate::extractors::CharOffsets;
use crate::patterns::{truncate, EVIDENCE_LIMIT};

const CONFIDENCE: f64 = 0.5;

const KO_SPACING: &[(&str, &str)] = &[
    ("할수있다", "할 수 있다"),
    ("할수없다", "할 수 없다"),
    ("할수도", "할 수도"),
    ("할수", "할 수"),
    ("될수있다", "될 수 있다"),
    ("될수없다", "될 수 없다"),
    ("될수도", "될 수도"),
    ("될수", "될 수"),
    ("볼수", "볼 수"),
    ("수있다", "수 있다"),
    ("수없다", "수 없다"),
    ("할것", "할 것"),
    ("될것", "될 것"),
    ("있는것", "있는 것"),
    ("없는것", "없는 것"),
    ("같은것", "같은 것"),
    ("좋은것", "좋은 것"),
    ("할뿐", "할 뿐"),
    ("될뿐", "될 뿐"),
    ("있을뿐", "있을 뿐"),
    ("없을뿐", "없을 뿐"),
    ("하는대로", "하는 대로"),
];

const KO_TYPOS: &[(&str, &str)] = &[
    ("되서", "돼서"),
    ("되요", "돼요"),
    ("됬어요", "됐어요"),
    ("됬습니다", "됐습니다"),
    ("됬다", "됐다"),
    ("됬", "됐"),
    ("안되요", "안 돼요"),
    ("안됩니다", "안 됩니다"),
    ("안되면", "안 되면"),
    ("안되서", "안 돼서"),
    ("안되다", "안 되다"),
    ("안되는", "안 되는"),
    ("안됬어요", "안 됐어요"),
    ("안됬다", "안 됐다"),
    ("안됬", "안 됐"),
    ("않되", "안 되"),
    (r"몇\s*일", "며칠"),
    ("오랫만", "오랜만"),
    ("웬지", "왠지"),
    ("왠만", "웬만"),
    ("할려고", "하려고"),
    ("할려", "하려"),
    ("할께요", "할게요"),
    ("할께", "할게"),
    ("갈께요", "갈게요"),
    ("올께요", "올게요"),
    ("될께요", "될게요"),
    ("거에요", "거예요"),
];

const EN_TYPOS: &[(&str, &str)] = &[
    ("teh", "the"),
    ("recieve", "receive"),
    ("recieved", "received"),
    ("seperate", "separate"),
    ("occured", "occurred"),
    ("occurence", "occurrence"),
    ("definately", "definitely"),
    ("alot", "a lot"),
    ("accomodate", "accommodate"),
    ("untill", "until"),
    ("wich", "which"),
    ("thier", "their"),
    ("enviroment", "environment"),
    ("goverment", "government"),
    ("neccessary", "necessary"),
    ("acheive", "achieve"),
    ("beleive", "believe"),
    ("existance", "existence"),
    ("independant", "independent"),
    ("refered", "referred"),
    ("succesful", "successful"),
    ("tommorow", "tomorrow"),
    ("wierd", "weird"),
];

struct Rule {
    pattern: Regex,
    correction: &'static str,
    subtype: Subtype,
    /// Only match when no Hangul syllable follows
    word_final: bool,
}

lazy_static! {
    static ref RULES: Vec<Rule> = {
        let spacing = KO_SPACING.iter().map(|&(pattern, correction)| Rule {
            pattern: Regex::new(pattern).unwrap(),
            correction,
            subtype: Subtype::SpacingSuspect,
            word_final: true,
        });
        let ko_typos = KO_TYPOS.iter().map(|&(pattern, correction)| Rule {
            pattern: Regex::new(pattern).unwrap(),
            correction,
            subtype: Subtype::CommonKoTypo,
            word_final: false,
        });
        let en_typos = EN_TYPOS.iter().map(|&(word, correction)| Rule {
            pattern: Regex::new(&format!(r"(?i)\b{}\b", word)).unwrap(),
            correction,
            subtype: Subtype::CommonEnTypo,
            word_final: false,
        });
        spacing.chain(ko_typos).chain(en_typos).collect()
    };
}

fn is_hangul_syllable(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

fn messages(rule: &Rule, wrong: &str) -> (String, String) {
    let ko = format!("맞춤법 의심 표현: '{}'", wrong);
    let en = match rule.subtype {
        Subtype::CommonEnTypo => format!("Common English typo detected: '{}'", wrong),
        _ => format!("Common Korean typo detected: '{}'", wrong),
    };
    (ko, en)
}

/// Apply every rule in table order until the per-page cap is reached
pub fn detect(ctx: &DetectorContext<'_>) -> Vec<Issue> {
    let max_per_page = ctx.config.spelling.max_issues_per_page;
    let mut issues = Vec::new();

    for page in ctx.pages {
        let text = &page.text;
        if page.is_blank() {
            continue;
        }
        let offsets = CharOffsets::new(text);
        let mut page_count = 0;

        'rules: for rule in RULES.iter() {
            for found in rule.pattern.find_iter(text) {
                if page_count >= max_per_page {
                    break 'rules;
                }
                let next = text[found.end()..].chars().next();
                if rule.word_final && next.is_some_and(is_hangul_syllable) {
                    continue;
                }
                let start = offsets.char_index(found.start());
                let end = offsets.char_index(found.end());
                let Some(location) = locate(page.page_number, start, end) else {
                    continue;
                };

                let wrong = found.as_str();
                let (ko_message, en_message) = messages(rule, wrong);
                let i18n = bilingual(
                    ko_message,
                    format!("교정안: '{}'", rule.correction),
                    en_message,
                    format!("Suggested form: '{}'", rule.correction),
                );
                issues.push(
                    Issue::new(
                        // rules may overlap at one start, so the end keeps ids unique
                        format!("{}_{}", issue_id("spelling", "common", page.page_number, start), end),
                        Category::Spelling,
                        location,
                        i18n,
                        ctx.language,
                    )
                    .with_subtype(Some(rule.subtype))
                    .with_evidence(truncate(wrong, EVIDENCE_LIMIT))
                    .with_confidence(CONFIDENCE),
                );
                page_count += 1;
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::detectors::test_support::page;
    use pretty_assertions::assert_eq;
    use quality_types::{IssueKind, Language, Severity};

    fn run(text: &str, language: Language) -> Vec<Issue> {
        let pages = [page(1, text)];
        let config = EngineConfig::default();
        let ctx = DetectorContext::new(&pages, &[], language, &config);
        detect(&ctx)
    }

    fn evidence(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.evidence.as_str()).collect()
    }

    #[test]
    fn test_korean_typo() {
        let issues = run("그렇게 하면 안되요.", Language::Ko);
        assert_eq!(evidence(&issues), vec!["되요", "안되요"]);
        let issue = &issues[1];
        assert_eq!(issue.id, "spelling_common_p1_7_10");
        assert_eq!(issue.message, "맞춤법 의심 표현: '안되요'");
        assert_eq!(issue.suggestion, "교정안: '안 돼요'");
        assert_eq!(issue.subtype, Some(Subtype::CommonKoTypo));
        assert_eq!(issue.kind, IssueKind::Warning);
        assert_eq!(issue.severity, Severity::Yellow);
        assert_eq!(issue.category, Category::Spelling);
    }

    #[test]
    fn test_spacing_rules_need_word_end() {
        assert_eq!(evidence(&run("이 일은 내가 할수 있다", Language::Ko)), vec!["할수"]);
        // `할수록` is a single word
        assert!(run("연습을 할수록 늘어난다", Language::Ko).is_empty());
    }

    #[test]
    fn test_flexible_whitespace_pattern() {
        let issues = run("몇 일 뒤에 봅시다", Language::Ko);
        assert_eq!(evidence(&issues), vec!["몇 일"]);
        assert_eq!(issues[0].i18n.en.suggestion, "Suggested form: '며칠'");
    }

    #[test]
    fn test_english_typos_match_whole_words() {
        let issues = run("Teh parcel was recieved. Tehran is fine.", Language::En);
        assert_eq!(evidence(&issues), vec!["Teh", "recieved"]);
        assert_eq!(issues[0].message, "Common English typo detected: 'Teh'");
        assert_eq!(issues[0].suggestion, "Suggested form: 'the'");
        assert_eq!(issues[1].location.start_char(), 15);
    }

    #[test]
    fn test_overlapping_rules_keep_distinct_ids() {
        let issues = run("일이 잘 됬다", Language::Ko);
        assert_eq!(evidence(&issues), vec!["됬다", "됬"]);
        assert_eq!(issues[0].id, "spelling_common_p1_5_7");
        assert_eq!(issues[1].id, "spelling_common_p1_5_6");
    }

    #[test]
    fn test_cap_per_page() {
        let text = "되서 되서 되서 되서 되서 되서 되서";
        assert_eq!(run(text, Language::Ko).len(), 5);
    }

    #[test]
    fn test_clean_text_passes() {
        assert!(run("오랜만에 만나서 반가웠어요. It was a lot of fun.", Language::Ko).is_empty());
    }
}
