//! Sajulint CLI: the `sajulint` command.
//!
//! Audits the three language documents, prints a console summary, and
//! persists the audit report plus the patch plan consumed by
//! `sajulint-apply`. Exit status: 0 when no CRITICAL or HIGH issue was
//! found, 1 otherwise, 2 on pre-flight failures.

use chrono::{SecondsFormat, Utc};
use clap::Parser;
use sajulint_audit::apply::PatchPlan;
use sajulint_audit::checks::Auditor;
use sajulint_kernel::catalog::RuleCatalog;
use sajulint_kernel::lang::{Lang, PerLang};
use sajulint_kernel::report::{AuditReport, InputDigest};
use sajulint_kernel::Severity;
use std::fs;
use std::path::PathBuf;

const REPORT_PATH: &str = "audit_report.json";
const PLAN_PATH: &str = "patch_plan.json";

#[derive(Parser)]
#[command(
    name = "sajulint",
    about = "Audit trilingual saju content documents for semantic drift",
    version
)]
struct Cli {
    /// Korean source-of-truth document
    ko: PathBuf,

    /// English translation document
    en: PathBuf,

    /// Japanese translation document
    jp: PathBuf,
}

fn write_json<T: serde::Serialize>(path: &str, value: &T) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|err| {
        eprintln!("[sajulint] ERROR: failed to render {path}: {err}");
        std::process::exit(2);
    });
    fs::write(path, format!("{rendered}\n")).unwrap_or_else(|err| {
        eprintln!("[sajulint] ERROR: failed to write {path}: {err}");
        std::process::exit(2);
    });
}

fn print_summary(report: &AuditReport) {
    let summary = &report.summary;
    println!(
        "[sajulint] summary: critical={} high={} medium={} low={} patches={}",
        summary.critical, summary.high, summary.medium, summary.low, summary.patches
    );
    for severity in Severity::ALL {
        let matching: Vec<_> = report
            .issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .collect();
        if matching.is_empty() {
            continue;
        }
        println!("[sajulint] {severity}:");
        for (idx, issue) in matching.iter().enumerate() {
            let langs = issue
                .langs
                .iter()
                .map(|lang| lang.code())
                .collect::<Vec<_>>()
                .join(",");
            println!("  {}. [{langs}] {}", idx + 1, issue.detail);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let paths = PerLang {
        ko: cli.ko,
        en: cli.en,
        jp: cli.jp,
    };

    // pre-flight: every input must exist before anything is loaded
    for lang in Lang::ALL {
        let path = paths.get(lang);
        if !path.exists() {
            eprintln!(
                "[sajulint] ERROR: {lang} document missing: {}",
                path.display()
            );
            std::process::exit(2);
        }
    }

    let docs = PerLang::from_fn(|lang| {
        let path = paths.get(lang);
        fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!(
                "[sajulint] ERROR: failed reading {}: {err}",
                path.display()
            );
            std::process::exit(2);
        })
    });
    for lang in Lang::ALL {
        println!(
            "[sajulint] loaded {lang}: {} ({} KiB)",
            paths.get(lang).display(),
            docs.get(lang).len() / 1024
        );
    }

    let catalog = RuleCatalog::builtin();
    let outcome = Auditor::new(&catalog).run(&docs);
    for line in &outcome.notes {
        println!("[sajulint] {line}");
    }

    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let inputs = PerLang::from_fn(|lang| {
        InputDigest::of(&paths.get(lang).display().to_string(), docs.get(lang))
    });
    let report = AuditReport::assemble(generated.clone(), inputs, outcome.issues, outcome.patches);

    print_summary(&report);

    let plan = PatchPlan::new(generated, paths, report.patches.clone());
    write_json(REPORT_PATH, &report);
    write_json(PLAN_PATH, &plan);
    println!("[sajulint] wrote {REPORT_PATH} and {PLAN_PATH}");

    if report.gate_failed() {
        std::process::exit(1);
    }
}
