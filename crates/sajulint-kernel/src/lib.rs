//! # Sajulint Kernel
//!
//! Vocabulary and data model for the trilingual saju-content audit: the
//! sexagenary key space, the rule catalog taken as ground truth for the run,
//! and the Issue/Patch/Report types every consistency check appends to.
//!
//! The kernel carries no extraction or check logic; that lives in
//! `sajulint-audit`. Everything here is deterministic data: fixed
//! enumeration orders, an immutable catalog, append-only collections.

pub mod catalog;
pub mod error;
pub mod ganji;
pub mod issue;
pub mod lang;
pub mod patch;
pub mod report;

pub use catalog::{Lexicon, RuleCatalog, StarRule};
pub use error::AuditError;
pub use ganji::{BRANCHES, CYCLE_LEN, Ganji, STEMS};
pub use issue::{CheckId, Issue, IssueData, Severity};
pub use lang::{Label, Lang, PerLang, Polarity};
pub use patch::PatchDescriptor;
pub use report::{AuditReport, InputDigest, IssueSummary, REPORT_SCHEMA};
