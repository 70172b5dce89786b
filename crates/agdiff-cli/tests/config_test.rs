mod common;
use common::TestFixture;

use predicates::prelude::*;

#[test]
fn test_config_show_defaults_when_missing() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains("[reasoning]"))
        .stdout(predicate::str::contains("early_phase_fraction"));
}

#[test]
fn test_config_init_then_refuses_overwrite() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default configuration"));
    assert!(fixture.config_path().is_file());

    fixture
        .command()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fixture
        .command()
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_is_rejected() {
    let fixture = TestFixture::new();
    std::fs::write(
        fixture.config_path(),
        "[analyzer]\nearly_phase_fraction = 0.0\n",
    )
    .unwrap();

    fixture
        .command()
        .args(["batch"])
        .arg(fixture.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("early_phase_fraction"));
}

#[test]
fn test_config_show_json() {
    let fixture = TestFixture::new();

    let output = fixture
        .command()
        .args(["--format", "json", "config", "show"])
        .output()
        .expect("Failed to run config show");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["reasoning"]["backend"], "command");
}
