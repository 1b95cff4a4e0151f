//! Integration tests for go-perf
//!
//! Exercises the public engine API against Go fixtures.

use go_perf::{analyze_file, Category, DetectionMode, Engine, Impact, Issue};
use pretty_assertions::assert_eq;
use std::path::Path;

fn summary(issues: &[Issue]) -> Vec<(usize, &str, Impact, Category)> {
    issues
        .iter()
        .map(|i| (i.line, i.title.as_str(), i.impact, i.category))
        .collect()
}

fn write_temp(name: &str, source: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Create temp dir");
    let file_path = temp_dir.path().join(name);
    std::fs::write(&file_path, source).expect("Write temp file");
    (temp_dir, file_path)
}

/// All three structural checks fire, in tree order, on a file that parses
#[test]
fn test_structural_fixture() {
    let result =
        analyze_file(Path::new("tests/fixtures/hot_paths.go")).expect("Analysis should succeed");

    assert_eq!(result.mode, DetectionMode::Structural);
    assert_eq!(
        summary(&result.issues),
        vec![
            (12, "String concatenation in loop", Impact::High, Category::Allocation),
            (
                18,
                "Slice allocated without capacity hint",
                Impact::Medium,
                Category::Allocation
            ),
            (34, "Potential goroutine leaks", Impact::Medium, Category::Goroutine),
        ]
    );
}

/// A syntax error switches the file to the heuristic patterns
#[test]
fn test_heuristic_fixture() {
    let result = analyze_file(Path::new("tests/fixtures/broken.go"))
        .expect("Parse failure must not be an error");

    assert_eq!(result.mode, DetectionMode::Heuristic);
    assert_eq!(
        summary(&result.issues),
        vec![
            (6, "String concatenation in loop", Impact::High, Category::Allocation),
            (
                8,
                "Slice allocated without capacity",
                Impact::Medium,
                Category::Allocation
            ),
        ]
    );
}

#[test]
fn test_clean_fixture() {
    let result =
        analyze_file(Path::new("tests/fixtures/clean.go")).expect("Analysis should succeed");
    assert_eq!(result.mode, DetectionMode::Structural);
    assert!(result.issues.is_empty(), "{:?}", result.issues);
}

/// Lines the heuristics would flag produce nothing when the file parses
#[test]
fn test_parsed_file_never_uses_heuristics() {
    let source = r#"package main

import "fmt"

func f() string {
	s := ""
	// make([]int)
	for i := 0; i < 3; i++ {
		s += fmt.Sprint("x", i)
	}
	return s
}
"#;
    let (_dir, path) = write_temp("parsed.go", source);

    let heuristic = go_perf::PatternRegistry::default().detect(source);
    assert_eq!(heuristic.len(), 2, "heuristics alone would report: {:?}", heuristic);

    let result = analyze_file(&path).unwrap();
    assert_eq!(result.mode, DetectionMode::Structural);
    assert!(result.issues.is_empty(), "{:?}", result.issues);
}

/// The goroutine check has no heuristic counterpart, so it is silent on fallback
#[test]
fn test_unparsed_file_never_uses_structural_rules() {
    let source = "package main\n\nfunc f() {\n\tgo func() {\n\t\tfor {\n\t\t}\n\t}()\n\tx :=\n}\n";
    let (_dir, path) = write_temp("unparsed.go", source);

    let result = analyze_file(&path).unwrap();
    assert_eq!(result.mode, DetectionMode::Heuristic);
    assert!(result.issues.is_empty(), "{:?}", result.issues);
}

#[test]
fn test_scenario_capacity_supplied() {
    let source = "package main\n\nfunc f() []int {\n\treturn g(make([]int, 0, 10000))\n}\n\n\
                  func h() {\n\tdata := make([]int, 0, 10000)\n\t_ = data\n}\n";
    let (_dir, path) = write_temp("cap.go", source);

    let result = analyze_file(&path).unwrap();
    assert!(result.issues.is_empty(), "{:?}", result.issues);
}

#[test]
fn test_scenario_spawned_infinite_loop() {
    let source = "package main\n\nfunc f() {\n\tgo func() { for {} }()\n}\n";
    let (_dir, path) = write_temp("spawn.go", source);

    let result = analyze_file(&path).unwrap();
    assert_eq!(
        summary(&result.issues),
        vec![(4, "Potential goroutine leaks", Impact::Medium, Category::Goroutine)]
    );
}

/// Bytes that are not UTF-8 cannot be Go source, so they take the heuristic path
#[test]
fn test_non_utf8_file_is_analyzed_heuristically() {
    let temp_dir = tempfile::tempdir().expect("Create temp dir");
    let path = temp_dir.path().join("latin1.go");
    let mut content = b"package main\n\n// caf".to_vec();
    content.push(0xe9);
    content.extend_from_slice(
        b"\nfunc f() {\n\tfor {\n\t\ts += \"x\"\n\t}\n\tdata := make([]int)\n}\n",
    );
    std::fs::write(&path, content).unwrap();

    let result = analyze_file(&path).expect("Undecodable bytes must not be an error");
    assert_eq!(result.mode, DetectionMode::Heuristic);
    assert_eq!(
        summary(&result.issues),
        vec![
            (6, "String concatenation in loop", Impact::High, Category::Allocation),
            (8, "Slice allocated without capacity", Impact::Medium, Category::Allocation),
        ]
    );

    let results = Engine::new().analyze_path(temp_dir.path()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0], result);
}

/// A loop nested N deep reports its concatenation once per enclosing loop
#[test]
fn test_nested_loop_concat_reported_per_loop() {
    let source = "package main\n\nfunc f(rows [][]string) string {\n\ts := \"\"\n\t\
                  for _, row := range rows {\n\t\tfor _, cell := range row {\n\t\t\t\
                  s += cell\n\t\t}\n\t}\n\treturn s\n}\n";
    let (_dir, path) = write_temp("nested.go", source);

    let result = analyze_file(&path).unwrap();
    assert_eq!(result.mode, DetectionMode::Structural);
    let lines: Vec<usize> = result.issues.iter().map(|i| i.line).collect();
    assert_eq!(lines, vec![7, 7]);
}

#[test]
fn test_empty_file_has_no_issues() {
    let (_dir, path) = write_temp("empty.go", "");
    let result = analyze_file(&path).expect("Empty file is not an error");
    assert!(result.issues.is_empty());
}

#[test]
fn test_missing_file_is_error() {
    assert!(analyze_file(Path::new("tests/fixtures/does_not_exist.go")).is_err());
}

#[test]
fn test_analysis_is_idempotent() {
    let engine = Engine::new();
    for fixture in ["tests/fixtures/hot_paths.go", "tests/fixtures/broken.go"] {
        let first = engine.analyze_file(Path::new(fixture)).unwrap();
        let second = engine.analyze_file(Path::new(fixture)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_directory_analysis() {
    let temp_dir = tempfile::tempdir().expect("Create temp dir");

    // tempfile may create dirs starting with '.', which discovery only allows at the root
    let project_dir = temp_dir.path().join("project");
    let pkg_dir = project_dir.join("pkg");
    let vendor_dir = project_dir.join("vendor");
    std::fs::create_dir_all(&pkg_dir).unwrap();
    std::fs::create_dir_all(&vendor_dir).unwrap();

    std::fs::copy("tests/fixtures/hot_paths.go", project_dir.join("main.go")).unwrap();
    std::fs::copy("tests/fixtures/broken.go", pkg_dir.join("broken.go")).unwrap();
    std::fs::copy("tests/fixtures/hot_paths.go", vendor_dir.join("dep.go")).unwrap();
    std::fs::write(project_dir.join("README.md"), "not go").unwrap();

    let results = Engine::new().analyze_path(&project_dir).unwrap();

    let files: Vec<_> = results
        .iter()
        .map(|r| r.file_path.strip_prefix(&project_dir).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        files,
        vec![Path::new("main.go").to_path_buf(), Path::new("pkg/broken.go").to_path_buf()]
    );
    assert_eq!(results[0].issues.len(), 3);
    assert_eq!(results[1].issues.len(), 2);
}

#[test]
fn test_every_issue_is_well_formed() {
    let engine = Engine::new();
    for fixture in ["tests/fixtures/hot_paths.go", "tests/fixtures/broken.go"] {
        let result = engine.analyze_file(Path::new(fixture)).unwrap();
        for issue in &result.issues {
            assert!(issue.line >= 1);
            assert!(!issue.title.is_empty());
            assert!(!issue.description.is_empty());
        }
    }
}
