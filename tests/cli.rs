//! CLI integration tests for the go-perf binary.
//!
//! Tests the command-line interface behavior.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command for the go-perf binary.
fn go_perf() -> Command {
    let mut cmd = cargo_bin_cmd!("go-perf");
    cmd.env_remove("GO_PERF_LOG");
    cmd
}

const LEAKY: &str = r#"package main

func main() {
	for i := 0; i < 3; i++ {
		msg += "x"
	}
}
"#;

const BROKEN: &str = "package main\n\nfunc main( {\n\tbuf := make([]byte)\n}\n";

#[test]
fn test_help_flag() {
    go_perf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preventive performance analysis for Go"));
}

#[test]
fn test_version_flag() {
    go_perf()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("go-perf"));
}

#[test]
fn test_rules_subcommand() {
    go_perf()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("string-concat-loop"))
        .stdout(predicate::str::contains("slice-no-capacity"))
        .stdout(predicate::str::contains("goroutine-leak"))
        .stdout(predicate::str::contains("Fallback patterns"));
}

#[test]
fn test_analyze_clean_code() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.go"), "package main\n\nfunc main() {}\n").unwrap();

    go_perf()
        .arg("analyze")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files analyzed: 1"))
        .stdout(predicate::str::contains("No performance issues detected!"));
}

#[test]
fn test_analyze_finds_issues() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.go"), LEAKY).unwrap();

    go_perf()
        .arg("analyze")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Line 5: String concatenation in loop (high impact)"));
}

#[test]
fn test_analyze_verbose_shows_suggestion() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.go"), LEAKY).unwrap();

    go_perf()
        .arg("analyze")
        .arg(temp.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Use strings.Builder for 3x better performance"));
}

#[test]
fn test_analyze_syntax_error_still_reports() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.go"), BROKEN).unwrap();

    go_perf()
        .arg("analyze")
        .arg(temp.path().join("broken.go"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Line 4: Slice allocated without capacity"));
}

#[test]
fn test_analyze_json_output() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.go"), LEAKY).unwrap();

    go_perf()
        .arg("analyze")
        .arg(temp.path())
        .arg("--output")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""mode": "structural""#))
        .stdout(predicate::str::contains(r#""impact": "high""#))
        .stdout(predicate::str::contains("Analyzing").not());
}

#[test]
fn test_analyze_json_from_config() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.go"), LEAKY).unwrap();
    fs::write(temp.path().join("go-perf.toml"), "[output]\nformat = \"json\"\n").unwrap();

    go_perf()
        .arg("analyze")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category": "allocation""#));
}

#[test]
fn test_analyze_min_impact_filters() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.go"), BROKEN).unwrap();

    go_perf()
        .arg("analyze")
        .arg(temp.path())
        .arg("--min-impact")
        .arg("high")
        .assert()
        .success()
        .stdout(predicate::str::contains("No performance issues detected!"));
}

#[test]
fn test_analyze_fail_on_high() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.go"), LEAKY).unwrap();

    go_perf()
        .arg("analyze")
        .arg(temp.path())
        .arg("--fail-on")
        .arg("high")
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue(s) at or above high impact"));
}

#[test]
fn test_analyze_nonexistent_path() {
    go_perf()
        .arg("analyze")
        .arg("/nonexistent/path/to/project")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_analyze_requires_path() {
    go_perf().arg("analyze").assert().failure();
}

#[test]
fn test_check_reports_high_impact_count() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.go"), LEAKY).unwrap();

    go_perf()
        .arg("check")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 high-impact performance issues"));
}

#[test]
fn test_check_alias_clean() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.go"), BROKEN).unwrap();

    // Only a medium-impact issue here
    go_perf()
        .arg("c")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No critical performance issues detected"));
}

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    go_perf()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(temp.path().join("go-perf.toml")).unwrap();
    assert!(content.contains("[analysis]"));
}

#[test]
fn test_init_fails_if_exists() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("go-perf.toml"), "").unwrap();

    go_perf()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
