//! End-to-end tests: run the `gatekeep` binary against fixture projects.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GATEKEEP_VARS: &[&str] = &[
    "GATEKEEP_COVERAGE_THRESHOLD",
    "GATEKEEP_COVERAGE_REPORT",
    "GATEKEEP_MIGRATIONS_DIR",
    "GATEKEEP_SCHEMA_PREFIXES",
    "GATEKEEP_MIGRATION_DETECTION",
    "GATEKEEP_MARKER_PATTERN",
    "GATEKEEP_MARKER_EXTENSIONS",
    "GATEKEEP_REPORT_FORMAT",
    "GATEKEEP_PARALLEL",
    "GATEKEEP_LOG",
];

/// The binary rooted at `root`, isolated from the caller's environment.
fn gatekeep(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gatekeep").unwrap();
    for var in GATEKEEP_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--root").arg(root);
    cmd
}

fn write(dir: &TempDir, rel: &str, content: &str) {
    let path = dir.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn coverage(dir: &TempDir, rate: &str) {
    write(dir, "cov/coverage.xml", &format!(r#"<coverage line-rate="{rate}"/>"#));
}

/// Schema change with an empty migrations directory fails with exit 1.
#[test]
fn scenario_a_schema_change_without_migration() {
    let dir = TempDir::new().unwrap();
    write(&dir, "app/models/user.py", "class User:\n    pass\n");
    fs::create_dir_all(dir.path().join("app/migrations")).unwrap();
    coverage(&dir, "0.9");

    gatekeep(dir.path())
        .arg("app/models/user.py")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "migration-consistency: FAIL - fail: schema changed but no new migration file detected",
        ))
        .stdout(predicate::str::contains("disallowed-marker: PASS"))
        .stdout(predicate::str::contains("coverage-threshold: PASS"));
}

/// Unrelated change with coverage above threshold passes with exit 0.
#[test]
fn scenario_b_clean_change_passes() {
    let dir = TempDir::new().unwrap();
    write(&dir, "README.md", "# project\n");
    coverage(&dir, "0.85");

    gatekeep(dir.path())
        .args(["--threshold", "0.80", "README.md"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("coverage 85.00% (threshold 80%)"))
        .stdout(predicate::str::contains("gate passed: 3/3 rules passed"));
}

/// Missing coverage artifact fails the coverage rule with exit 1.
#[test]
fn scenario_c_missing_coverage_artifact() {
    let dir = TempDir::new().unwrap();

    gatekeep(dir.path())
        .arg("README.md")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("coverage-threshold: FAIL"))
        .stdout(predicate::str::contains("coverage artifact not found"));
}

/// A line-start marker fails the marker rule, naming the file, while the
/// other rules still report PASS.
#[test]
fn scenario_d_marker_found() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "app/service.py",
        "def f():\n    return 1\n# TODO: remove after fix\n",
    );
    coverage(&dir, "0.95");

    gatekeep(dir.path())
        .arg("app/service.py")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("disallowed-marker: FAIL"))
        .stdout(predicate::str::contains("app/service.py"))
        .stdout(predicate::str::contains("migration-consistency: PASS"))
        .stdout(predicate::str::contains("coverage-threshold: PASS"));
}

/// Invalid configuration exits 2 before any rule runs.
#[test]
fn invalid_threshold_exits_2() {
    let dir = TempDir::new().unwrap();
    gatekeep(dir.path())
        .args(["--threshold", "1.5"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[CONFIG_ERROR]"));
}

#[test]
fn absolute_change_set_path_exits_2() {
    let dir = TempDir::new().unwrap();
    gatekeep(dir.path())
        .arg("/etc/passwd")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[CHANGESET_ERROR]"));
}

#[test]
fn unknown_rule_exits_2() {
    let dir = TempDir::new().unwrap();
    gatekeep(dir.path())
        .args(["--rule", "spelling"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("spelling"));
}

#[test]
fn bad_env_threshold_exits_2() {
    let dir = TempDir::new().unwrap();
    gatekeep(dir.path())
        .env("GATEKEEP_COVERAGE_THRESHOLD", "high")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GATEKEEP_COVERAGE_THRESHOLD"));
}

/// Paths piped on stdin join the change set.
#[test]
fn paths_from_stdin() {
    let dir = TempDir::new().unwrap();
    write(&dir, "app/models/user.py", "class User: pass\n");
    write(&dir, "app/migrations/0002_user.py", "");
    coverage(&dir, "0.9");

    gatekeep(dir.path())
        .args(["--paths-from", "-"])
        .write_stdin("app/models/user.py\napp/migrations/0002_user.py\n")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("0002_user.py"));
}

/// `--rule` restricts the report to the selected rules.
#[test]
fn rule_filter_limits_report() {
    let dir = TempDir::new().unwrap();
    coverage(&dir, "0.9");

    gatekeep(dir.path())
        .args(["--rule", "coverage-threshold", "app/models/user.py"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("migration-consistency").not());
}

/// The project config file is picked up from the root.
#[test]
fn project_config_file_applies() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "gatekeep.toml",
        "[coverage]\nthreshold = 0.95\nreport_path = \"build/cov.xml\"\n",
    );
    write(&dir, "build/cov.xml", r#"<coverage line-rate="0.9"/>"#);

    gatekeep(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("coverage 90.00% (threshold 95%)"));
}

#[test]
fn json_format_is_parseable() {
    let dir = TempDir::new().unwrap();
    coverage(&dir, "0.9");

    let output = gatekeep(dir.path())
        .args(["--format", "json", "README.md"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["passed"], true);
    assert_eq!(payload["rule_count"], 3);
    assert!(payload["fingerprint"].as_str().is_some());
}

#[test]
fn junit_format() {
    let dir = TempDir::new().unwrap();
    gatekeep(dir.path())
        .args(["--format", "junit"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("<failure"));
}

/// Two runs over the same state print identical reports.
#[test]
fn repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    write(&dir, "app/models/user.py", "class User: pass\n");
    coverage(&dir, "0.7");

    let args = ["--format", "json", "app/models/user.py"];
    let first = gatekeep(dir.path()).args(args).output().unwrap();
    let second = gatekeep(dir.path()).args(args).output().unwrap();
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), Some(1));
}
