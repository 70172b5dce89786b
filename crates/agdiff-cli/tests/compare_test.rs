mod common;
use common::TestFixture;

use agdiff_testing::{run, write_summary};
use predicates::prelude::*;
use serde_json::{Value, json};

fn write_pair(fixture: &TestFixture, candidate: &[&str], reference: &[&str]) -> std::path::PathBuf {
    fixture
        .cases()
        .add_case(
            "needs-glob",
            &run("candidate").tools(candidate).build(),
            &run("reference").tools(reference).build(),
        )
        .expect("Failed to write case")
}

#[test]
fn test_compare_prints_text_report() {
    let fixture = TestFixture::new();
    let case = write_pair(&fixture, &["Read", "Edit"], &["Glob", "Read", "Edit"]);

    fixture
        .command()
        .arg("compare")
        .arg(case.join("candidate.json"))
        .arg(case.join("reference.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Comparison: needs-glob ==="))
        .stdout(predicate::str::contains("reference only: glob"))
        .stdout(predicate::str::contains(
            "Tool calls: candidate 2 vs reference 3",
        ));
}

#[test]
fn test_compare_json_output() {
    let fixture = TestFixture::new();
    let case = write_pair(&fixture, &["Read"], &["Read"]);

    let output = fixture
        .command()
        .args(["--format", "json", "compare"])
        .arg(case.join("candidate.json"))
        .arg(case.join("reference.json"))
        .args(["--use-case", "renamed"])
        .output()
        .expect("Failed to run compare");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["insight"]["kind"], "IDENTICAL");
    assert_eq!(json["report"]["use_case"], "renamed");
    assert_eq!(json["report"]["usage"]["jaccard_similarity"], 1.0);
    assert_eq!(json["differences"], json!([]));
    assert!(json.get("analysis").is_none());
}

#[test]
fn test_compare_writes_markdown() {
    let fixture = TestFixture::new();
    let case = write_pair(&fixture, &["Read"], &["TodoWrite", "Read"]);
    let markdown = fixture.root().join("out").join("report.md");

    fixture
        .command()
        .arg("compare")
        .arg(case.join("candidate.json"))
        .arg(case.join("reference.json"))
        .arg("--markdown")
        .arg(&markdown)
        .assert()
        .success();

    let content = std::fs::read_to_string(&markdown).expect("markdown written");
    assert!(content.starts_with("# Comparison: needs-glob"));
    assert!(content.contains("- Reference only: todowrite"));
}

#[test]
fn test_compare_accepts_null_tool_calls() {
    let fixture = TestFixture::new();
    let candidate = fixture.root().join("candidate.json");
    std::fs::write(
        &candidate,
        r#"{"agent_id":"candidate","tool_calls":null,"success":true}"#,
    )
    .unwrap();
    let reference = fixture.root().join("reference.json");
    write_summary(&reference, &run("reference").tools(&["Read"]).build()).unwrap();

    fixture
        .command()
        .arg("compare")
        .arg(&candidate)
        .arg(&reference)
        .assert()
        .success()
        .stdout(predicate::str::contains("(no tool calls)"));
}

#[test]
fn test_compare_missing_file_fails() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("compare")
        .arg(fixture.root().join("nope.json"))
        .arg(fixture.root().join("nope2.json"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: failed to load execution summary"));
}

#[test]
fn test_analyze_without_locations_fails_fast() {
    let fixture = TestFixture::new();
    let case = write_pair(&fixture, &["Read"], &["Glob"]);

    fixture
        .command()
        .arg("compare")
        .arg(case.join("candidate.json"))
        .arg(case.join("reference.json"))
        .arg("--analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tool documentation location is not set"));
}

#[cfg(unix)]
#[test]
fn test_analyze_reports_root_cause() {
    let fixture = TestFixture::new();
    fixture.with_reasoning_script(
        "cat > /dev/null; echo 'The system prompt never asks for a search step.'",
    );
    let case = write_pair(&fixture, &["Read"], &["Glob", "Read"]);

    fixture
        .command()
        .arg("compare")
        .arg(case.join("candidate.json"))
        .arg(case.join("reference.json"))
        .arg("--analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Root cause: PROMPT_ISSUE (confidence 0.80)",
        ))
        .stdout(predicate::str::contains("Reference-only tools: glob"));
}

#[cfg(unix)]
#[test]
fn test_analyze_skips_service_without_gap() {
    let fixture = TestFixture::new();
    // Fails loudly if it is ever invoked
    fixture.with_reasoning_script("exit 42");
    let case = write_pair(&fixture, &["Read", "Bash"], &["Read"]);

    let output = fixture
        .command()
        .args(["--format", "json", "compare"])
        .arg(case.join("candidate.json"))
        .arg(case.join("reference.json"))
        .arg("--analyze")
        .output()
        .expect("Failed to run compare");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["analysis"]["root_cause"], "NONE");
    assert_eq!(json["analysis"]["confidence"], 1.0);
    assert!(json["analysis"]["analyzed_at"].is_string());
}

#[cfg(unix)]
#[test]
fn test_analyze_survives_service_that_ignores_stdin() {
    let fixture = TestFixture::new();
    fixture.with_reasoning_script("echo 'Glob is missing from the candidate registry.'; exit 0");
    // Long enough that the prompt overflows the pipe buffer
    let reference = vec!["Glob"; 20_000];
    let case = write_pair(&fixture, &["Read"], &reference);

    fixture
        .command()
        .arg("compare")
        .arg(case.join("candidate.json"))
        .arg(case.join("reference.json"))
        .arg("--analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("Root cause: MISSING_TOOL"));
}
