//! Language and categorical vocabulary shared across the audit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Audited languages. `Ko` is the source of truth; `En` and `Jp` are the
/// first and second translations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ko,
    En,
    Jp,
}

impl Lang {
    /// Fixed iteration order for deterministic reporting.
    pub const ALL: [Lang; 3] = [Lang::Ko, Lang::En, Lang::Jp];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ko => "ko",
            Lang::En => "en",
            Lang::Jp => "jp",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One value per audited language, in fixed ko/en/jp field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerLang<T> {
    pub ko: T,
    pub en: T,
    pub jp: T,
}

impl<T> PerLang<T> {
    pub fn from_fn(mut f: impl FnMut(Lang) -> T) -> Self {
        Self {
            ko: f(Lang::Ko),
            en: f(Lang::En),
            jp: f(Lang::Jp),
        }
    }

    pub fn get(&self, lang: Lang) -> &T {
        match lang {
            Lang::Ko => &self.ko,
            Lang::En => &self.en,
            Lang::Jp => &self.jp,
        }
    }

    pub fn get_mut(&mut self, lang: Lang) -> &mut T {
        match lang {
            Lang::Ko => &mut self.ko,
            Lang::En => &mut self.en,
            Lang::Jp => &mut self.jp,
        }
    }
}

/// Three-level categorical rating attached to a named star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Auspicious,
    Neutral,
    Inauspicious,
}

impl Label {
    const ALL: [Label; 3] = [Label::Auspicious, Label::Neutral, Label::Inauspicious];

    /// Literal surface token used by each language's documents.
    pub fn token(self, lang: Lang) -> &'static str {
        match (lang, self) {
            (Lang::Ko, Label::Auspicious) => "길",
            (Lang::Ko, Label::Neutral) => "중",
            (Lang::Ko, Label::Inauspicious) => "흉",
            (Lang::En, Label::Auspicious) => "Auspicious",
            (Lang::En, Label::Neutral) => "Neutral",
            (Lang::En, Label::Inauspicious) => "Inauspicious",
            (Lang::Jp, Label::Auspicious) => "吉",
            (Lang::Jp, Label::Neutral) => "中",
            (Lang::Jp, Label::Inauspicious) => "凶",
        }
    }

    pub fn from_token(token: &str, lang: Lang) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|label| label.token(lang) == token)
    }
}

/// Sentiment polarity derived from distinct-keyword presence voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        })
    }
}
