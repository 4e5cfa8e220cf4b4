//! # Sajulint Audit
//!
//! Extraction, classification, and the nine ordered consistency checks over
//! the three language documents, plus the generic patch-plan interpreter.
//!
//! The audit is a single synchronous pass: documents are loaded once by the
//! caller, every check appends to the shared outcome, and the result is a
//! pure function of the inputs and the catalog. Nothing here writes to the
//! audited documents; only the patch interpreter in [`apply`] touches disk,
//! and only in live mode.

pub mod apply;
pub mod checks;
pub mod classify;
pub mod extract;
pub mod labels;

pub use apply::{ApplyMode, ApplyOutcome, PLAN_SCHEMA, PatchPlan, apply_plan};
pub use checks::{AuditOutcome, Auditor};
pub use classify::classify_polarity;
pub use extract::{PromptRecord, extract_display_names, extract_prompt_records};
pub use labels::extract_star_labels;
