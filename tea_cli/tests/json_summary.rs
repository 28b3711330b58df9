use assert_cmd::prelude::*;
use rstest::rstest;
use std::process::Command;
use tempfile::tempdir;

fn last_json_line(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with('{'))
        .expect("a JSON line on stdout");
    serde_json::from_str(line).expect("valid JSON")
}

/// Validate the summary schema for a successful multi-batch run.
#[rstest]
fn json_success_schema() {
    let dir = tempdir().unwrap();
    let out = Command::cargo_bin("tea_cli")
        .unwrap()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--json")
        .arg("run")
        .arg("--no-csv")
        .arg("--profile")
        .arg("gentle")
        .arg("--batches")
        .arg("3")
        .output()
        .unwrap();
    assert!(out.status.success());

    let v = last_json_line(&out.stdout);
    assert_eq!(v["profile"], "gentle");
    assert_eq!(v["batches"], 3);
    assert_eq!(v["elapsed_seconds"], 120);
    assert_eq!(v["steps"], 120);
    let finals = v["final"].as_array().unwrap();
    assert_eq!(finals.len(), 3);
    for (i, f) in finals.iter().enumerate() {
        assert_eq!(f["batch"], i);
        let score = f["quality_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert!(matches!(
            f["quality_status"].as_str().unwrap(),
            "GOOD" | "OK" | "BAD"
        ));
        for key in ["moisture", "temperature_c", "aroma", "color"] {
            assert!(f[key].is_number(), "{key} missing");
        }
    }
}

#[rstest]
#[case(&["run", "--no-csv", "--dt", "0"], "InvalidConfig")]
#[case(&["run", "--no-csv", "--profile", "turbo"], "UnknownProfile")]
fn json_error_schema(#[case] args: &[&str], #[case] reason: &str) {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("tea_cli").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--json");
    for a in args {
        cmd.arg(a);
    }
    let out = cmd.output().unwrap();
    assert_eq!(out.status.code(), Some(2));

    let text = String::from_utf8_lossy(&out.stderr);
    let line = text
        .lines()
        .rev()
        .find(|l| l.contains("\"reason\""))
        .expect("JSON error on stderr");
    let v: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(v["reason"], reason);
    assert!(v["message"].as_str().unwrap().contains("What happened"));
}
