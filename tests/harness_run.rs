//! End-to-end tests: lab layout on disk → prepared context → suite summary.

use std::fs;
use std::path::Path;

use labcheck::harness::{ConsoleReport, JsonReport};
use labcheck::{Harness, HarnessConfig, HarnessContext, HarnessError, ManifestError, TestStatus, ToolchainError};
use tempfile::TempDir;

const SOLVER: &str = r#"read n
if [ "$n" = "loop" ]; then
  while true; do :; done
fi
echo "Gauss method"
echo "x[1] = 1.0000"
echo "x[2] = -2.0000"
"#;

fn write_lab(root: &Path, manifest: &str) {
    let lab_dir = root.join("labs").join("lab-1");
    let tests_dir = root.join("tests").join("lab-1");
    fs::create_dir_all(&lab_dir).unwrap();
    fs::create_dir_all(tests_dir.join("input")).unwrap();
    fs::create_dir_all(tests_dir.join("expected")).unwrap();

    fs::write(lab_dir.join("solve.sh"), SOLVER).unwrap();
    fs::write(tests_dir.join("manifest.json"), manifest).unwrap();
    fs::write(tests_dir.join("input").join("system.txt"), "2\n1 0 1\n0 1 -2\n").unwrap();
    fs::write(tests_dir.join("expected").join("header.txt"), "Gauss method\n\n").unwrap();
}

fn config(root: &Path) -> HarnessConfig {
    let script = root.join("labs").join("lab-1").join("solve.sh");
    HarnessConfig::new(root, "1").with_run_cmd(format!("sh {}", script.display()))
}

const MANIFEST: &str = r#"{
    "timeout_sec": 2,
    "solution_tolerance": 0.001,
    "input_description": "n, then the augmented matrix rows",
    "tests": [
        {
            "in": "system.txt",
            "out_contains": "header.txt",
            "expected_solution": [1, -2]
        },
        {
            "in": "2\n1 0 1\n0 1 -2",
            "description": "wrong answer",
            "out_regex": ["x\\[1\\]\\s*=\\s*1"],
            "expected_solution": [1, 2]
        },
        {
            "in": "loop",
            "out_contains": "never"
        },
        {
            "in": "2\n1 0 1\n0 1 -2",
            "out_contains": ["Gauss", "method"]
        }
    ]
}"#;

#[tokio::test]
async fn test_full_suite_with_run_cmd() {
    let temp = TempDir::new().unwrap();
    write_lab(temp.path(), MANIFEST);

    let context = HarnessContext::prepare(&config(temp.path()).with_show_answers(true))
        .await
        .unwrap();
    assert_eq!(context.manifest.tests.len(), 4);
    assert!(context.show_answers);

    let mut sink = ConsoleReport::new(Vec::new(), context.manifest.timeout_sec)
        .with_answers(context.show_answers)
        .with_input_description(context.manifest.input_description.clone());
    let summary = Harness::new(context).run(&mut sink).await.unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.timed_out, 1);
    assert!(!summary.all_passed());

    let statuses: Vec<TestStatus> = summary.results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![TestStatus::Passed, TestStatus::Failed, TestStatus::TimedOut, TestStatus::Passed]
    );
    assert_eq!(summary.results[1].missing, vec!["solution:x2:expected≈2"]);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert!(text.contains("PASS Test 1 (system.txt)\n"));
    assert!(text.contains("FAIL Test 2 (wrong answer): missing [\"solution:x2:expected≈2\"]\n"));
    assert!(text.contains("  Input format: n, then the augmented matrix rows\n"));
    assert!(text.contains("FAIL Test 3 (loop): timed out after 2s\n"));
    assert!(text.ends_with("Passed 2/4 tests (1 failed, 1 timed out)\n"));
}

#[tokio::test]
async fn test_json_report() {
    let temp = TempDir::new().unwrap();
    let manifest = r#"{"tests": [{"in": "1", "out_contains": "Gauss"}]}"#;
    write_lab(temp.path(), manifest);

    let context = HarnessContext::prepare(&config(temp.path())).await.unwrap();
    let mut out = Vec::new();
    let summary = Harness::new(context)
        .run(&mut JsonReport::new(&mut out))
        .await
        .unwrap();
    assert!(summary.all_passed());

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["passed"], 1);
    assert_eq!(value["results"][0]["status"], "passed");
}

#[tokio::test]
async fn test_missing_manifest_is_fatal() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("labs").join("lab-1")).unwrap();

    let err = HarnessContext::prepare(&config(temp.path())).await.unwrap_err();
    assert!(matches!(err, HarnessError::Manifest(ManifestError::NotFound(_))));
}

#[tokio::test]
async fn test_nothing_to_run_is_fatal() {
    let temp = TempDir::new().unwrap();
    write_lab(temp.path(), MANIFEST);

    let err = HarnessContext::prepare(&HarnessConfig::new(temp.path(), "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::Toolchain(ToolchainError::NothingToRun)));
}

#[tokio::test]
async fn test_missing_expectation_file_aborts_run() {
    let temp = TempDir::new().unwrap();
    let manifest = r#"{"tests": [
        {"in": "1", "out_contains": "Gauss"},
        {"in": "1", "out_contains": "absent.txt"}
    ]}"#;
    write_lab(temp.path(), manifest);

    let context = HarnessContext::prepare(&config(temp.path())).await.unwrap();
    let mut sink = ConsoleReport::new(Vec::new(), 5);
    let err = Harness::new(context).run(&mut sink).await.unwrap_err();
    assert!(matches!(err, HarnessError::Resource(_)));

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text, "PASS Test 1 (1)\n");
}
