//! Patch-plan application: one generic interpreter over patch descriptors.
//!
//! Mechanical patches are literal find/replace. A missing find string is a
//! warning and a skip, not an error: the document may already be fixed, or
//! its structure may have changed. Manual-review patches are rendered with
//! their reference texts and never applied. Live mode writes a timestamped
//! backup of each target before its first mutation; dry-run writes nothing.

use chrono::Utc;
use sajulint_kernel::error::AuditError;
use sajulint_kernel::lang::PerLang;
use sajulint_kernel::patch::PatchDescriptor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PLAN_SCHEMA: u32 = 1;

/// The persisted patch plan: target documents plus ordered descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchPlan {
    pub schema: u32,
    pub generated: String,
    pub targets: PerLang<PathBuf>,
    pub patches: Vec<PatchDescriptor>,
}

impl PatchPlan {
    pub fn new(
        generated: String,
        targets: PerLang<PathBuf>,
        patches: Vec<PatchDescriptor>,
    ) -> Self {
        Self {
            schema: PLAN_SCHEMA,
            generated,
            targets,
            patches,
        }
    }

    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let payload = fs::read_to_string(path).map_err(|e| AuditError::io(path, e))?;
        serde_json::from_str(&payload).map_err(|e| AuditError::MalformedArtifact {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    DryRun,
    Live,
}

/// What one application run did, in emission order.
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    /// Mechanical patches whose find string matched (would-apply in
    /// dry-run).
    pub applied: usize,
    /// Mechanical patches skipped because the find string was absent.
    pub skipped: usize,
    /// Manual-review patches rendered but not applied.
    pub manual: usize,
    /// Target documents rewritten (live mode only), first-touch order.
    pub modified: Vec<PathBuf>,
    /// Ordered console lines.
    pub lines: Vec<String>,
}

fn backup_path(target: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let mut name = target.as_os_str().to_os_string();
    name.push(format!(".bak.{stamp}"));
    PathBuf::from(name)
}

fn short(text: &str) -> String {
    if text.chars().count() <= 60 {
        return text.to_string();
    }
    let head: String = text.chars().take(60).collect();
    format!("{head}...")
}

/// Interpret every descriptor in plan order against its target document.
pub fn apply_plan(plan: &PatchPlan, mode: ApplyMode) -> Result<ApplyOutcome, AuditError> {
    let mut out = ApplyOutcome::default();
    for patch in &plan.patches {
        let target = plan.targets.get(patch.lang());
        match patch.find_replace() {
            None => {
                out.manual += 1;
                out.lines.push(format!("[manual] {}", patch.note()));
                if let PatchDescriptor::FieldReview {
                    current,
                    reference_ko,
                    reference_en,
                    ..
                } = patch
                {
                    out.lines.push(format!("  current:      {}", short(current)));
                    out.lines
                        .push(format!("  reference ko: {}", short(reference_ko)));
                    out.lines
                        .push(format!("  reference en: {}", short(reference_en)));
                }
            }
            Some((find, replace)) => {
                let content =
                    fs::read_to_string(target).map_err(|e| AuditError::io(target.clone(), e))?;
                if !content.contains(find) {
                    out.skipped += 1;
                    out.lines.push(format!(
                        "[skip] pattern not found (already fixed or moved): {}",
                        patch.note()
                    ));
                    continue;
                }
                let count = content.matches(find).count();
                match mode {
                    ApplyMode::DryRun => {
                        out.lines.push(format!(
                            "[dry-run] would replace {count} occurrence(s) in {}: {}",
                            target.display(),
                            patch.note()
                        ));
                    }
                    ApplyMode::Live => {
                        // back up the original content once per target,
                        // before its first mutation
                        if !out.modified.iter().any(|p| p == target) {
                            let backup = backup_path(target);
                            fs::copy(target, &backup)
                                .map_err(|e| AuditError::io(backup.clone(), e))?;
                            out.lines.push(format!(
                                "[backup] {} -> {}",
                                target.display(),
                                backup.display()
                            ));
                            out.modified.push(target.clone());
                        }
                        fs::write(target, content.replace(find, replace))
                            .map_err(|e| AuditError::io(target.clone(), e))?;
                        out.lines.push(format!(
                            "[patched] {count} occurrence(s) in {}: {}",
                            target.display(),
                            patch.note()
                        ));
                    }
                }
                out.applied += 1;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sajulint_kernel::ganji::Ganji;
    use sajulint_kernel::lang::Lang;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempDirGuard {
        path: PathBuf,
    }

    impl TempDirGuard {
        fn new(prefix: &str) -> Self {
            let unique = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos();
            let path = std::env::temp_dir().join(format!(
                "sajulint-apply-{prefix}-{}-{unique}",
                std::process::id()
            ));
            fs::create_dir_all(&path).expect("temp dir should be created");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TempDirGuard {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    fn plan_with(targets: PerLang<PathBuf>, patches: Vec<PatchDescriptor>) -> PatchPlan {
        PatchPlan::new("2026-08-07T00:00:00Z".to_string(), targets, patches)
    }

    fn label_patch(find: &str, replace: &str) -> PatchDescriptor {
        PatchDescriptor::LabelReplace {
            lang: Lang::Ko,
            star: "귀문관살".to_string(),
            find: find.to_string(),
            replace: replace.to_string(),
            note: "label correction".to_string(),
        }
    }

    fn write_targets(dir: &Path, ko: &str) -> PerLang<PathBuf> {
        let targets = PerLang {
            ko: dir.join("ko.html"),
            en: dir.join("en.html"),
            jp: dir.join("jp.html"),
        };
        fs::write(&targets.ko, ko).expect("ko target written");
        fs::write(&targets.en, "en body").expect("en target written");
        fs::write(&targets.jp, "jp body").expect("jp target written");
        targets
    }

    #[test]
    fn dry_run_reports_but_never_writes() {
        let dir = TempDirGuard::new("dry");
        let targets = write_targets(dir.path(), "head 귀문관살(흉) tail 귀문관살(흉)");
        let plan = plan_with(
            targets.clone(),
            vec![label_patch("귀문관살(흉)", "귀문관살(중)")],
        );
        let outcome = apply_plan(&plan, ApplyMode::DryRun).expect("apply should pass");
        assert_eq!(outcome.applied, 1);
        assert!(outcome.modified.is_empty());
        assert_eq!(
            fs::read_to_string(&targets.ko).expect("ko readable"),
            "head 귀문관살(흉) tail 귀문관살(흉)"
        );
        assert!(outcome.lines.iter().any(|l| l.contains("2 occurrence(s)")));
    }

    #[test]
    fn live_mode_backs_up_once_and_replaces_every_occurrence() {
        let dir = TempDirGuard::new("live");
        let original = "head 귀문관살(흉) tail 귀문관살(흉)";
        let targets = write_targets(dir.path(), original);
        let plan = plan_with(
            targets.clone(),
            vec![label_patch("귀문관살(흉)", "귀문관살(중)")],
        );
        let outcome = apply_plan(&plan, ApplyMode::Live).expect("apply should pass");
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.modified, vec![targets.ko.clone()]);
        assert_eq!(
            fs::read_to_string(&targets.ko).expect("ko readable"),
            "head 귀문관살(중) tail 귀문관살(중)"
        );

        let backups: Vec<PathBuf> = fs::read_dir(dir.path())
            .expect("dir readable")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.to_string_lossy().contains(".bak."))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            fs::read_to_string(&backups[0]).expect("backup readable"),
            original
        );
    }

    #[test]
    fn absent_pattern_is_a_warned_skip_not_an_error() {
        let dir = TempDirGuard::new("skip");
        let targets = write_targets(dir.path(), "already fixed: 귀문관살(중)");
        let plan = plan_with(
            targets.clone(),
            vec![label_patch("귀문관살(흉)", "귀문관살(중)")],
        );
        let outcome = apply_plan(&plan, ApplyMode::Live).expect("apply should pass");
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.modified.is_empty());
        assert!(outcome.lines.iter().any(|l| l.starts_with("[skip]")));
    }

    #[test]
    fn manual_review_patches_are_rendered_and_refused() {
        let dir = TempDirGuard::new("manual");
        let targets = write_targets(dir.path(), "ko body");
        let before = fs::read_to_string(&targets.jp).expect("jp readable");
        let plan = plan_with(
            targets.clone(),
            vec![PatchDescriptor::FieldReview {
                lang: Lang::Jp,
                ganji: Ganji::parse("甲子").expect("cycle member"),
                current: "現在".to_string(),
                reference_ko: "참조".to_string(),
                reference_en: "reference".to_string(),
                note: "review the jp spouse-fortune text".to_string(),
            }],
        );
        let outcome = apply_plan(&plan, ApplyMode::Live).expect("apply should pass");
        assert_eq!(outcome.manual, 1);
        assert_eq!(outcome.applied, 0);
        assert!(outcome.modified.is_empty());
        assert_eq!(fs::read_to_string(&targets.jp).expect("jp readable"), before);
        assert!(outcome.lines.iter().any(|l| l.starts_with("[manual]")));
    }

    #[test]
    fn two_patches_on_one_target_share_a_single_backup() {
        let dir = TempDirGuard::new("stack");
        let targets = write_targets(dir.path(), "first and second");
        let plan = plan_with(
            targets.clone(),
            vec![
                label_patch("first", "FIRST"),
                label_patch("second", "SECOND"),
            ],
        );
        let outcome = apply_plan(&plan, ApplyMode::Live).expect("apply should pass");
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.modified.len(), 1);
        assert_eq!(
            fs::read_to_string(&targets.ko).expect("ko readable"),
            "FIRST and SECOND"
        );
        let backups: Vec<PathBuf> = fs::read_dir(dir.path())
            .expect("dir readable")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.to_string_lossy().contains(".bak."))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            fs::read_to_string(&backups[0]).expect("backup readable"),
            "first and second"
        );
    }

    #[test]
    fn plan_roundtrips_through_json() {
        let dir = TempDirGuard::new("plan");
        let targets = write_targets(dir.path(), "body");
        let plan = plan_with(targets, vec![label_patch("a", "b")]);
        let path = dir.path().join("patch_plan.json");
        fs::write(
            &path,
            serde_json::to_string_pretty(&plan).expect("plan serializes"),
        )
        .expect("plan written");
        let loaded = PatchPlan::load(&path).expect("plan loads");
        assert_eq!(loaded, plan);
        assert!(PatchPlan::load(&dir.path().join("missing.json")).is_err());
    }
}
