use sajulint_kernel::ganji::Ganji;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
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
            "sajulint-cli-{prefix}-{}-{unique}",
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

fn run_audit<I, S>(dir: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_sajulint"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("sajulint command should execute")
}

fn run_apply<I, S>(dir: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_sajulint-apply"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("sajulint-apply command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn parse_json_file(path: &Path) -> Value {
    let payload = fs::read_to_string(path).expect("json artifact should be readable");
    serde_json::from_str(&payload).expect("json artifact should parse")
}

fn prompt_entry(ganji: Ganji, spouse: &str) -> String {
    format!("'{ganji}':{{t:'기둥',d:'풀이',s:'{spouse}'}}\n")
}

fn base_doc(lang: &str) -> String {
    let mut doc = String::new();
    for ganji in Ganji::cycle() {
        doc.push_str(&prompt_entry(ganji, ""));
        doc.push_str(&format!("'{ganji}':{{hanja:'{ganji}',name:'이름'}}\n"));
    }
    match lang {
        "ko" => doc.push_str("귀문관살(중)\n공망 전실 · 세운 평가 · 조자시\n"),
        "en" => doc.push_str(
            "Spirit Gate (Neutral)\nVOID BREAK · Annual Rating · early midnight\n\
             filter(i => i.t && i.t.includes('合') && i.t !== '天合')\n",
        ),
        "jp" => doc.push_str("鬼門関殺(中)\n脱空 · 歳運評価 · 早子時\n"),
        other => panic!("unknown language {other}"),
    }
    doc
}

fn write_clean_docs(dir: &Path) {
    for lang in ["ko", "en", "jp"] {
        fs::write(dir.join(format!("{lang}.html")), base_doc(lang))
            .expect("fixture doc should be written");
    }
}

const AUDIT_ARGS: [&str; 3] = ["ko.html", "en.html", "jp.html"];

#[test]
fn clean_documents_pass_the_gate_and_persist_artifacts() {
    let dir = TempDirGuard::new("clean");
    write_clean_docs(dir.path());

    let output = run_audit(dir.path(), AUDIT_ARGS);
    assert_success(&output);

    let report = parse_json_file(&dir.path().join("audit_report.json"));
    assert_eq!(report["schema"], 1);
    assert_eq!(report["summary"]["critical"], 0);
    assert_eq!(report["summary"]["high"], 0);
    assert_eq!(report["summary"]["patches"], 0);
    // the standing catalog-gap reminder is always present
    assert_eq!(report["summary"]["low"], 1);
    assert_eq!(report["inputs"]["ko"]["path"], "ko.html");

    let plan = parse_json_file(&dir.path().join("patch_plan.json"));
    assert_eq!(plan["schema"], 1);
    assert_eq!(plan["patches"].as_array().map(Vec::len), Some(0));
}

#[test]
fn missing_input_is_a_preflight_error() {
    let dir = TempDirGuard::new("preflight");
    write_clean_docs(dir.path());
    fs::remove_file(dir.path().join("jp.html")).expect("jp fixture removed");

    let output = run_audit(dir.path(), AUDIT_ARGS);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("jp document missing"),
        "stderr should name the missing document"
    );
    assert!(!dir.path().join("audit_report.json").exists());
}

#[test]
fn one_missing_record_fails_the_gate_with_a_critical_issue() {
    let dir = TempDirGuard::new("missing-record");
    write_clean_docs(dir.path());
    let victim = Ganji::parse("戊辰").expect("cycle member");
    let mutilated = base_doc("jp").replace(&prompt_entry(victim, ""), "");
    fs::write(dir.path().join("jp.html"), mutilated).expect("jp fixture rewritten");

    let output = run_audit(dir.path(), AUDIT_ARGS);
    assert_eq!(output.status.code(), Some(1));

    let report = parse_json_file(&dir.path().join("audit_report.json"));
    assert_eq!(report["summary"]["critical"], 1);
    let critical = &report["issues"][0];
    assert_eq!(critical["severity"], "CRITICAL");
    assert_eq!(critical["check"], "record_completeness");
    assert_eq!(critical["langs"][0], "jp");
    assert_eq!(critical["data"]["missing"][0], "戊辰");
}

#[test]
fn wrong_label_yields_a_plan_that_apply_executes() {
    let dir = TempDirGuard::new("label");
    write_clean_docs(dir.path());
    let broken = base_doc("ko").replace("귀문관살(중)", "귀문관살(흉)");
    fs::write(dir.path().join("ko.html"), &broken).expect("ko fixture rewritten");

    // MEDIUM findings do not fail the gate
    let output = run_audit(dir.path(), AUDIT_ARGS);
    assert_success(&output);

    let plan = parse_json_file(&dir.path().join("patch_plan.json"));
    let patch = &plan["patches"][0];
    assert_eq!(patch["type"], "label_replace");
    assert_eq!(patch["find"], "귀문관살(흉)");
    assert_eq!(patch["replace"], "귀문관살(중)");

    // dry-run reports without touching the document
    let dry = run_apply(dir.path(), ["patch_plan.json", "--dry-run"]);
    assert_success(&dry);
    assert_eq!(
        fs::read_to_string(dir.path().join("ko.html")).expect("ko readable"),
        broken
    );

    // live mode patches the document and keeps a timestamped backup
    let live = run_apply(dir.path(), ["patch_plan.json"]);
    assert_success(&live);
    assert!(
        String::from_utf8_lossy(&live.stdout).contains("golden-master"),
        "live apply should remind about the golden-master regression"
    );
    let patched = fs::read_to_string(dir.path().join("ko.html")).expect("ko readable");
    assert!(patched.contains("귀문관살(중)"));
    assert!(!patched.contains("귀문관살(흉)"));
    let backups: Vec<PathBuf> = fs::read_dir(dir.path())
        .expect("dir readable")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.to_string_lossy().contains("ko.html.bak."))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(
        fs::read_to_string(&backups[0]).expect("backup readable"),
        broken
    );
}

#[test]
fn reports_are_identical_apart_from_the_timestamp() {
    let dir = TempDirGuard::new("determinism");
    write_clean_docs(dir.path());

    let first_run = run_audit(dir.path(), AUDIT_ARGS);
    assert_success(&first_run);
    let mut first = parse_json_file(&dir.path().join("audit_report.json"));

    let second_run = run_audit(dir.path(), AUDIT_ARGS);
    assert_success(&second_run);
    let mut second = parse_json_file(&dir.path().join("audit_report.json"));

    first["generated"] = Value::Null;
    second["generated"] = Value::Null;
    assert_eq!(first, second);
}
