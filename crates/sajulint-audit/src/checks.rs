//! The ordered consistency checks.
//!
//! Checks run in a fixed sequence and only append to the shared outcome;
//! a check that fails to find an optional pattern never aborts the rest.
//! The sequence affects report ordering, not correctness.

use crate::classify::classify_polarity;
use crate::extract::{PromptRecord, extract_display_names, extract_prompt_records};
use crate::labels::extract_star_labels;
use regex::Regex;
use sajulint_kernel::catalog::RuleCatalog;
use sajulint_kernel::ganji::Ganji;
use sajulint_kernel::issue::{CheckId, Issue, IssueData, Severity};
use sajulint_kernel::lang::{Lang, PerLang, Polarity};
use sajulint_kernel::patch::PatchDescriptor;
use std::collections::BTreeMap;

/// Target star for the label check: the rule catalog pins it to neutral,
/// and historic documents rendered it as inauspicious.
const LABEL_TARGET_STAR: &str = "귀문관살";

/// Languages whose label is a literal bracketed suffix. The English
/// document already carries the neutral parenthetical.
const LABEL_TARGET_LANGS: [Lang; 2] = [Lang::Ko, Lang::Jp];

// Bureau-formation filter in the English document. The legacy fragment
// keeps heavenly-stem combinations, so 天合 entries are misread as
// completed formations downstream.
const BUREAU_FILTER_BUGGY: &str = "filter(i => i.t && i.t.includes('合'))";
const BUREAU_FILTER_FIXED: &str = "filter(i => i.t && i.t.includes('合') && i.t !== '天合')";
const BUREAU_EXCLUSION_MARKS: [&str; 2] = ["i.t !== '天合'", "i.t != \"天合\""];

const BLADE_VOID_KO: [&str; 3] = ["양인.*공망", "공망.*양인", "양인이 공망"];
const BLADE_VOID_EN: [&str; 3] = ["Sheep Blade.*void", "void.*Sword Edge", "sword edge.*void"];
const BLADE_VOID_JP: [&str; 2] = ["羊刃.*空亡", "空亡.*羊刃"];

const QUADRUPLE_KO: [&str; 3] = ["4개.*같은.*지지", "지지.*4개", "쿼드러플"];
const QUADRUPLE_EN: [&str; 3] = ["quadruple", "four.*same.*branch", "4.*identical.*branch"];
const QUADRUPLE_JP: [&str; 3] = ["四重", "4つの同じ", "同じ地支.*4"];

const NAYIN_KO: [&str; 3] = ["납음.*같은", "일간.*납음.*동일", "보이는 것이 전부"];
const NAYIN_EN: [&str; 3] = ["same.*naeum", "naeum.*same.*day master", "transparent"];
const NAYIN_JP: [&str; 2] = ["納音.*同じ", "日干.*納音.*同一"];

fn any_pattern_found(doc: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| {
        Regex::new(&format!("(?i){pattern}"))
            .expect("coverage regex")
            .is_match(doc)
    })
}

fn any_marker_found(doc: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| doc.contains(marker))
}

fn any_marker_found_ci(doc: &str, markers: &[&str]) -> bool {
    let lowered = doc.to_lowercase();
    markers
        .iter()
        .any(|marker| lowered.contains(&marker.to_lowercase()))
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= 40 {
        return text.to_string();
    }
    let head: String = text.chars().take(40).collect();
    format!("{head}...")
}

/// Everything one audit run accumulated, in emission order.
#[derive(Debug, Default)]
pub struct AuditOutcome {
    pub issues: Vec<Issue>,
    pub patches: Vec<PatchDescriptor>,
    /// Ordered informational console lines; never part of the report.
    pub notes: Vec<String>,
}

impl AuditOutcome {
    fn note(&mut self, line: impl Into<String>) {
        self.notes.push(line.into());
    }
}

/// Runs the fixed check sequence against three loaded documents.
pub struct Auditor<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> Auditor<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn run(&self, docs: &PerLang<String>) -> AuditOutcome {
        let mut out = AuditOutcome::default();
        let records = PerLang::from_fn(|lang| extract_prompt_records(docs.get(lang)));
        self.check_record_completeness(docs, &records, &mut out);
        self.check_spouse_polarity(&records, &mut out);
        self.check_star_labels(docs, &mut out);
        self.check_required_sections(docs, &mut out);
        self.check_bureau_filter(docs, &mut out);
        self.check_blade_void_coverage(docs, &mut out);
        self.check_quadruple_coverage(docs, &mut out);
        self.check_nayin_coverage(docs, &mut out);
        self.check_midnight_convention(docs, &mut out);
        out
    }

    fn check_record_completeness(
        &self,
        docs: &PerLang<String>,
        records: &PerLang<BTreeMap<Ganji, PromptRecord>>,
        out: &mut AuditOutcome,
    ) {
        for lang in Lang::ALL {
            let table = records.get(lang);
            let missing: Vec<Ganji> = Ganji::cycle().filter(|g| !table.contains_key(g)).collect();
            if missing.is_empty() {
                out.note(format!(
                    "[{lang}] prompt table complete: {} records",
                    table.len()
                ));
            } else {
                let listed = missing
                    .iter()
                    .map(Ganji::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                out.issues.push(
                    Issue::new(
                        Severity::Critical,
                        CheckId::RecordCompleteness,
                        vec![lang],
                        format!(
                            "{lang} prompt table missing {} of 60 records: {listed}",
                            missing.len()
                        ),
                    )
                    .with_data(IssueData::MissingRecords { missing }),
                );
            }
            let names = extract_display_names(docs.get(lang));
            out.note(format!(
                "[{lang}] display table: {} named records",
                names.len()
            ));
        }
    }

    fn check_spouse_polarity(
        &self,
        records: &PerLang<BTreeMap<Ganji, PromptRecord>>,
        out: &mut AuditOutcome,
    ) {
        let mut conflicts = 0usize;
        for ganji in Ganji::cycle() {
            let texts = PerLang::from_fn(|lang| {
                records
                    .get(lang)
                    .get(&ganji)
                    .map(|record| record.spouse.clone())
                    .unwrap_or_default()
            });
            let polarities = PerLang::from_fn(|lang| {
                classify_polarity(texts.get(lang), self.catalog.lexicons.get(lang))
            });
            if polarities.ko == Polarity::Neutral
                || polarities.jp == Polarity::Neutral
                || polarities.ko == polarities.jp
            {
                continue;
            }
            conflicts += 1;
            out.issues.push(
                Issue::new(
                    Severity::High,
                    CheckId::SpousePolarity,
                    vec![Lang::Ko, Lang::Jp],
                    format!(
                        "{ganji} spouse-fortune polarity diverges: ko={} ({}) vs jp={} ({})",
                        polarities.ko,
                        excerpt(&texts.ko),
                        polarities.jp,
                        excerpt(&texts.jp),
                    ),
                )
                .with_data(IssueData::PolarityConflict {
                    ganji,
                    polarities: polarities.clone(),
                    excerpts: texts.clone(),
                }),
            );
            // ko/en agreement marks jp as the outlier; translated prose
            // cannot be regenerated mechanically, so review only.
            if polarities.ko == polarities.en {
                out.patches.push(PatchDescriptor::FieldReview {
                    lang: Lang::Jp,
                    ganji,
                    current: texts.jp.clone(),
                    reference_ko: texts.ko.clone(),
                    reference_en: texts.en.clone(),
                    note: format!(
                        "{ganji}: rewrite the jp spouse-fortune text against the ko/en references"
                    ),
                });
            }
        }
        if conflicts == 0 {
            out.note("spouse-fortune polarity agrees across the full cycle");
        } else {
            out.note(format!("spouse-fortune polarity conflicts: {conflicts}"));
        }
    }

    fn check_star_labels(&self, docs: &PerLang<String>, out: &mut AuditOutcome) {
        let labels =
            PerLang::from_fn(|lang| extract_star_labels(docs.get(lang), lang, self.catalog));
        if let Some(rule) = self.catalog.star(LABEL_TARGET_STAR) {
            for lang in LABEL_TARGET_LANGS {
                let expected = rule.expected.token(lang);
                let Some(current) = labels.get(lang).get(rule.name) else {
                    continue;
                };
                if current == expected {
                    continue;
                }
                let Some(surface) = rule.surface(lang) else {
                    continue;
                };
                out.issues.push(
                    Issue::new(
                        Severity::Medium,
                        CheckId::StarLabels,
                        vec![lang],
                        format!(
                            "{lang} {} label is ({current}), catalog expects ({expected})",
                            rule.name
                        ),
                    )
                    .with_data(IssueData::LabelMismatch {
                        star: rule.name.to_string(),
                        current: current.clone(),
                        expected: expected.to_string(),
                    }),
                );
                out.patches.push(PatchDescriptor::LabelReplace {
                    lang,
                    star: rule.name.to_string(),
                    find: format!("{surface}({current})"),
                    replace: format!("{surface}({expected})"),
                    note: format!("correct the {lang} {} label to ({expected})", rule.name),
                });
            }
        }
        for lang in Lang::ALL {
            let inventory = labels
                .get(lang)
                .iter()
                .map(|(name, token)| format!("{name}({token})"))
                .collect::<Vec<_>>();
            if inventory.is_empty() {
                out.note(format!("[{lang}] no star labels found"));
            } else {
                out.note(format!("[{lang}] star labels: {}", inventory.join(" ")));
            }
        }
    }

    fn check_required_sections(&self, docs: &PerLang<String>, out: &mut AuditOutcome) {
        for lang in Lang::ALL {
            let found =
                any_marker_found(docs.get(lang), self.catalog.void_break_markers.get(lang));
            if found {
                out.note(format!("[{lang}] void-break section present"));
            } else if lang == Lang::En {
                out.note(format!("[{lang}] void-break section absent"));
            } else {
                out.issues.push(Issue::new(
                    Severity::Low,
                    CheckId::RequiredSections,
                    vec![lang],
                    format!("{lang} narrative lacks the void-break section (year the void is filled)"),
                ));
            }
        }
        for lang in Lang::ALL {
            let found =
                any_marker_found(docs.get(lang), self.catalog.annual_rating_markers.get(lang));
            out.note(format!(
                "[{lang}] annual-rating markers {}",
                if found { "present" } else { "absent" }
            ));
        }
    }

    fn check_bureau_filter(&self, docs: &PerLang<String>, out: &mut AuditOutcome) {
        let doc = docs.get(Lang::En);
        let fix_applied = BUREAU_EXCLUSION_MARKS
            .iter()
            .any(|mark| doc.contains(mark));
        let bug_present =
            doc.contains(BUREAU_FILTER_BUGGY) && !doc.contains(BUREAU_EXCLUSION_MARKS[0]);
        if bug_present {
            out.issues.push(Issue::new(
                Severity::High,
                CheckId::BureauFilter,
                vec![Lang::En],
                "en bureau filter keeps stem combinations: 天合 entries are read as completed formations",
            ));
            out.patches.push(PatchDescriptor::CodeFragment {
                lang: Lang::En,
                find: BUREAU_FILTER_BUGGY.to_string(),
                replace: BUREAU_FILTER_FIXED.to_string(),
                note: "exclude 天合 from the bureau formation filter".to_string(),
            });
        } else if fix_applied {
            out.note("[en] bureau filter already excludes 天合");
        } else {
            out.note("[en] bureau filter literal not found; structure may have changed, review manually");
        }
    }

    fn check_blade_void_coverage(&self, docs: &PerLang<String>, out: &mut AuditOutcome) {
        for lang in Lang::ALL {
            let patterns: &[&str] = match lang {
                Lang::Ko => &BLADE_VOID_KO,
                Lang::En => &BLADE_VOID_EN,
                Lang::Jp => &BLADE_VOID_JP,
            };
            let found = any_pattern_found(docs.get(lang), patterns);
            out.note(format!(
                "[{lang}] blade-in-void special reading {}",
                if found { "present" } else { "absent" }
            ));
        }
    }

    fn check_quadruple_coverage(&self, docs: &PerLang<String>, out: &mut AuditOutcome) {
        for lang in Lang::ALL {
            let patterns: &[&str] = match lang {
                Lang::Ko => &QUADRUPLE_KO,
                Lang::En => &QUADRUPLE_EN,
                Lang::Jp => &QUADRUPLE_JP,
            };
            let found = any_pattern_found(docs.get(lang), patterns);
            out.note(format!(
                "[{lang}] quadruple same-branch reading {}",
                if found { "present" } else { "absent" }
            ));
        }
        // Standing reminder, independent of what the search found: the
        // catalog defines self-punishment only up to the triple case.
        out.issues.push(Issue::new(
            Severity::Low,
            CheckId::QuadruplePunishment,
            Lang::ALL.to_vec(),
            "rule catalog covers self-punishment up to three identical branches; \
             four or more identical branches remain undefined",
        ));
    }

    fn check_nayin_coverage(&self, docs: &PerLang<String>, out: &mut AuditOutcome) {
        for lang in Lang::ALL {
            let patterns: &[&str] = match lang {
                Lang::Ko => &NAYIN_KO,
                Lang::En => &NAYIN_EN,
                Lang::Jp => &NAYIN_JP,
            };
            let found = any_pattern_found(docs.get(lang), patterns);
            out.note(format!(
                "[{lang}] nayin-equals-day-master reading {}",
                if found { "present" } else { "absent" }
            ));
        }
    }

    fn check_midnight_convention(&self, docs: &PerLang<String>, out: &mut AuditOutcome) {
        for lang in Lang::ALL {
            let found = any_marker_found_ci(
                docs.get(lang),
                self.catalog.early_midnight_markers.get(lang),
            );
            if lang == Lang::En && !found {
                out.issues.push(Issue::new(
                    Severity::Low,
                    CheckId::MidnightConvention,
                    vec![Lang::En],
                    "en omits the early-midnight hour convention stated by ko and jp",
                ));
            } else {
                out.note(format!(
                    "[{lang}] early-midnight convention {}",
                    if found { "stated" } else { "not stated" }
                ));
            }
        }
    }
}
