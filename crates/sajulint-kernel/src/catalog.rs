//! Ground-truth rule catalog.
//!
//! The catalog is read-only for the duration of a run and passed into the
//! auditor at construction, so isolated tests can substitute a reduced
//! catalog instead of patching process-wide state.

use crate::lang::{Label, Lang, PerLang};

/// Positive/negative keyword lists driving one language's polarity voting.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub positive: &'static [&'static str],
    pub negative: &'static [&'static str],
}

/// Expected rating and localized surface forms for one named star.
#[derive(Debug, Clone)]
pub struct StarRule {
    /// Canonical (Korean) name; doubles as the Korean surface form.
    pub name: &'static str,
    pub surface_en: Option<&'static str>,
    pub surface_jp: Option<&'static str>,
    pub expected: Label,
}

impl StarRule {
    /// Surface form used by `lang`'s documents, if the star has one there.
    pub fn surface(&self, lang: Lang) -> Option<&'static str> {
        match lang {
            Lang::Ko => Some(self.name),
            Lang::En => self.surface_en,
            Lang::Jp => self.surface_jp,
        }
    }
}

const SPOUSE_POSITIVE_KO: &[&str] = &[
    "좋습", "안정", "원만", "행복", "성실", "든든", "귀인", "지지", "아름", "화목",
];
const SPOUSE_NEGATIVE_KO: &[&str] = &[
    "갈등", "어려", "힘든", "조심", "약할", "분리", "충돌", "이별", "냉정", "주의", "복잡",
    "어긋",
];
const SPOUSE_POSITIVE_EN: &[&str] = &[
    "stable",
    "harmonious",
    "supportive",
    "good",
    "strong",
    "great",
    "blessed",
    "excellent",
];
const SPOUSE_NEGATIVE_EN: &[&str] = &[
    "conflict",
    "difficult",
    "caution",
    "weak",
    "strain",
    "friction",
    "turbulence",
    "unstable",
    "challenge",
];
const SPOUSE_POSITIVE_JP: &[&str] = &[
    "安定", "良い", "堅実", "幸せ", "円満", "支え", "穏", "充実", "優秀", "幸福",
];
const SPOUSE_NEGATIVE_JP: &[&str] = &[
    "葛藤", "困難", "注意", "弱", "別離", "衝突", "苦労", "トラブル", "難しい", "問題",
];

const VOID_BREAK_KO: &[&str] = &[
    "공망 전실",
    "탈공(脫空)",
    "脫空",
    "공망이 채워",
    "공망을 깨뜨림",
    "voidBreakDesc",
];
const VOID_BREAK_EN: &[&str] = &["VOID BREAK", "Void Break", "breaks Void", "void break"];
const VOID_BREAK_JP: &[&str] = &["脱空", "空亡填実", "空亡が満たされ", "空亡を破"];

const ANNUAL_RATING_KO: &[&str] = &["세운 평가", "돌파의 해", "突破", "大運 評價", "대운 평가"];
const ANNUAL_RATING_EN: &[&str] = &["Annual Rating", "BREAKTHROUGH", "VOLATILE", "NEUTRAL"];
const ANNUAL_RATING_JP: &[&str] = &["歳運評価", "突破", "好転", "ブレイクスルー"];

const EARLY_MIDNIGHT_KO: &[&str] = &["조자시", "早子時"];
const EARLY_MIDNIGHT_EN: &[&str] = &["early midnight", "early-midnight", "早子時"];
const EARLY_MIDNIGHT_JP: &[&str] = &["早子時", "조자시", "アーリー"];

/// Static ground truth for one audit run: keyword lexicons, star rules, and
/// the marker alternatives the section checks look for.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    pub lexicons: PerLang<Lexicon>,
    pub stars: Vec<StarRule>,
    /// Marker alternatives signaling the void-break narrative section.
    pub void_break_markers: PerLang<&'static [&'static str]>,
    /// Marker alternatives signaling the annual-rating section.
    pub annual_rating_markers: PerLang<&'static [&'static str]>,
    /// Marker alternatives stating the early-midnight hour convention.
    pub early_midnight_markers: PerLang<&'static [&'static str]>,
}

impl RuleCatalog {
    pub fn builtin() -> Self {
        Self {
            lexicons: PerLang {
                ko: Lexicon {
                    positive: SPOUSE_POSITIVE_KO,
                    negative: SPOUSE_NEGATIVE_KO,
                },
                en: Lexicon {
                    positive: SPOUSE_POSITIVE_EN,
                    negative: SPOUSE_NEGATIVE_EN,
                },
                jp: Lexicon {
                    positive: SPOUSE_POSITIVE_JP,
                    negative: SPOUSE_NEGATIVE_JP,
                },
            },
            stars: vec![
                StarRule {
                    name: "귀문관살",
                    surface_en: Some("Spirit Gate"),
                    surface_jp: Some("鬼門関殺"),
                    expected: Label::Neutral,
                },
                StarRule {
                    name: "화개살",
                    surface_en: Some("Canopy Star"),
                    surface_jp: Some("華蓋殺"),
                    expected: Label::Neutral,
                },
                StarRule {
                    name: "학당귀인",
                    surface_en: Some("Academy Noble"),
                    surface_jp: Some("学堂貴人"),
                    expected: Label::Auspicious,
                },
                StarRule {
                    name: "천의성",
                    surface_en: Some("Heavenly Doctor"),
                    surface_jp: Some("天醫星"),
                    expected: Label::Auspicious,
                },
                StarRule {
                    name: "양인살",
                    surface_en: None,
                    surface_jp: None,
                    expected: Label::Neutral,
                },
                StarRule {
                    name: "도화살",
                    surface_en: None,
                    surface_jp: None,
                    expected: Label::Neutral,
                },
                StarRule {
                    name: "백호살",
                    surface_en: None,
                    surface_jp: None,
                    expected: Label::Neutral,
                },
                StarRule {
                    name: "역마살",
                    surface_en: None,
                    surface_jp: None,
                    expected: Label::Neutral,
                },
            ],
            void_break_markers: PerLang {
                ko: VOID_BREAK_KO,
                en: VOID_BREAK_EN,
                jp: VOID_BREAK_JP,
            },
            annual_rating_markers: PerLang {
                ko: ANNUAL_RATING_KO,
                en: ANNUAL_RATING_EN,
                jp: ANNUAL_RATING_JP,
            },
            early_midnight_markers: PerLang {
                ko: EARLY_MIDNIGHT_KO,
                en: EARLY_MIDNIGHT_EN,
                jp: EARLY_MIDNIGHT_JP,
            },
        }
    }

    /// Star rule by canonical name.
    pub fn star(&self, name: &str) -> Option<&StarRule> {
        self.stars.iter().find(|star| star.name == name)
    }
}
