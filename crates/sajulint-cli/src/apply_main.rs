//! Sajulint patch applier: the `sajulint-apply` command.
//!
//! Interprets a patch plan produced by `sajulint`. Mechanical patches are
//! literal find/replace; manual-review patches are rendered and refused.
//! Live mode backs up each target before its first mutation.

use clap::Parser;
use sajulint_audit::apply::{ApplyMode, PatchPlan, apply_plan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sajulint-apply",
    about = "Apply the mechanical patches from a sajulint patch plan",
    version
)]
struct Cli {
    /// Patch plan JSON produced by `sajulint`
    plan: PathBuf,

    /// Report intended changes without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();
    let plan = match PatchPlan::load(&cli.plan) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("[sajulint-apply] ERROR: {err}");
            std::process::exit(2);
        }
    };
    let mode = if cli.dry_run {
        ApplyMode::DryRun
    } else {
        ApplyMode::Live
    };
    println!(
        "[sajulint-apply] {} patch(es) from {}{}",
        plan.patches.len(),
        cli.plan.display(),
        if cli.dry_run { " (dry-run)" } else { "" }
    );

    let outcome = match apply_plan(&plan, mode) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("[sajulint-apply] ERROR: {err}");
            std::process::exit(1);
        }
    };
    for line in &outcome.lines {
        println!("[sajulint-apply] {line}");
    }
    println!(
        "[sajulint-apply] applied={} skipped={} manual={}",
        outcome.applied, outcome.skipped, outcome.manual
    );
    if !outcome.modified.is_empty() {
        println!("[sajulint-apply] run the golden-master regression against each modified document:");
        for path in &outcome.modified {
            println!("  {}", path.display());
        }
    }
}
