//! Patch descriptors: the data the patch-application step interprets.
//!
//! `LabelReplace` and `CodeFragment` are mechanical: an exact find/replace
//! the applier may execute directly. `FieldReview` carries reference texts
//! only and must never be applied automatically, since translated prose
//! cannot be mechanically regenerated.

use crate::ganji::Ganji;
use crate::lang::Lang;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PatchDescriptor {
    /// Manual review of one prompt-record field against reference texts.
    #[serde(rename_all = "camelCase")]
    FieldReview {
        lang: Lang,
        ganji: Ganji,
        current: String,
        reference_ko: String,
        reference_en: String,
        note: String,
    },

    /// Literal replacement of a star's bracketed label token.
    #[serde(rename_all = "camelCase")]
    LabelReplace {
        lang: Lang,
        star: String,
        find: String,
        replace: String,
        note: String,
    },

    /// Literal replacement of a known buggy code fragment.
    #[serde(rename_all = "camelCase")]
    CodeFragment {
        lang: Lang,
        find: String,
        replace: String,
        note: String,
    },
}

impl PatchDescriptor {
    pub fn lang(&self) -> Lang {
        match self {
            Self::FieldReview { lang, .. }
            | Self::LabelReplace { lang, .. }
            | Self::CodeFragment { lang, .. } => *lang,
        }
    }

    pub fn note(&self) -> &str {
        match self {
            Self::FieldReview { note, .. }
            | Self::LabelReplace { note, .. }
            | Self::CodeFragment { note, .. } => note,
        }
    }

    /// Exact find/replace pair for mechanical patches; `None` marks a
    /// manual-review patch the applier must refuse.
    pub fn find_replace(&self) -> Option<(&str, &str)> {
        match self {
            Self::LabelReplace { find, replace, .. }
            | Self::CodeFragment { find, replace, .. } => Some((find, replace)),
            Self::FieldReview { .. } => None,
        }
    }
}
