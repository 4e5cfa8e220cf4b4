//! Audit report assembly.

use crate::issue::{Issue, Severity};
use crate::lang::PerLang;
use crate::patch::PatchDescriptor;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const REPORT_SCHEMA: u32 = 1;

/// Identity of one loaded input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDigest {
    pub path: String,
    pub bytes: usize,
    pub sha256: String,
}

impl InputDigest {
    pub fn of(path: &str, content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        Self {
            path: path.to_string(),
            bytes: content.len(),
            sha256: format!("{:x}", hasher.finalize()),
        }
    }
}

/// Per-severity totals plus the patch count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub patches: usize,
}

/// The persisted audit artifact. Deterministic apart from `generated`:
/// identical inputs must yield byte-identical reports otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub schema: u32,
    pub generated: String,
    pub inputs: PerLang<InputDigest>,
    pub summary: IssueSummary,
    pub issues: Vec<Issue>,
    pub patches: Vec<PatchDescriptor>,
}

impl AuditReport {
    /// Assemble a report. `generated` is supplied by the caller so the rest
    /// stays a pure function of the audit outcome.
    pub fn assemble(
        generated: String,
        inputs: PerLang<InputDigest>,
        issues: Vec<Issue>,
        patches: Vec<PatchDescriptor>,
    ) -> Self {
        let count =
            |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
        let summary = IssueSummary {
            critical: count(Severity::Critical),
            high: count(Severity::High),
            medium: count(Severity::Medium),
            low: count(Severity::Low),
            patches: patches.len(),
        };
        Self {
            schema: REPORT_SCHEMA,
            generated,
            inputs,
            summary,
            issues,
            patches,
        }
    }

    /// Gate verdict: any CRITICAL or HIGH finding rejects the run.
    pub fn gate_failed(&self) -> bool {
        self.summary.critical + self.summary.high > 0
    }
}
