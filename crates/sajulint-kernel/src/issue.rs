//! Audit issues: severity-tagged findings accumulated across checks.

use crate::ganji::Ganji;
use crate::lang::{Lang, PerLang, Polarity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding severity. Assigned once at creation and never revised by a
/// later check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Fixed order used for summary rendering.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        })
    }
}

/// Which check produced an issue. Serialized ids are stable; report order
/// follows check execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    RecordCompleteness,
    SpousePolarity,
    StarLabels,
    RequiredSections,
    BureauFilter,
    BladeVoidCoverage,
    QuadruplePunishment,
    NayinCoverage,
    MidnightConvention,
}

/// Structured payload carried by issues with machine-usable detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum IssueData {
    #[serde(rename_all = "camelCase")]
    MissingRecords { missing: Vec<Ganji> },
    #[serde(rename_all = "camelCase")]
    PolarityConflict {
        ganji: Ganji,
        polarities: PerLang<Polarity>,
        excerpts: PerLang<String>,
    },
    #[serde(rename_all = "camelCase")]
    LabelMismatch {
        star: String,
        current: String,
        expected: String,
    },
}

/// One audit finding. Append-only within a run; never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    pub check: CheckId,
    /// Affected languages; all three for catalog-wide findings.
    pub langs: Vec<Lang>,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<IssueData>,
}

impl Issue {
    pub fn new(
        severity: Severity,
        check: CheckId,
        langs: Vec<Lang>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            check,
            langs,
            detail: detail.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: IssueData) -> Self {
        self.data = Some(data);
        self
    }
}
