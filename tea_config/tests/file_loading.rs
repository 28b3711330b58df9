use std::fs;

use rstest::rstest;
use tea_config::{Profile, load_file};
use tempfile::tempdir;

#[rstest]
fn loads_config_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tea.toml");
    fs::write(
        &path,
        "[simulation]\nprofile = \"gentle\"\ndrying_seconds = 45\n",
    )
    .unwrap();

    let cfg = load_file(&path).expect("load from disk");
    assert_eq!(cfg.simulation.profile, Profile::Gentle);
    assert_eq!(cfg.simulation.drying_seconds, 45);
    assert_eq!(cfg.simulation.steaming_seconds, 30);
}

#[rstest]
fn reports_path_on_syntax_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[simulation\ndt_seconds = 1\n").unwrap();

    let err = load_file(&path).expect_err("broken TOML must fail");
    let msg = format!("{err}");
    assert!(msg.contains("invalid configuration"), "{msg}");
    assert!(msg.contains("broken.toml"), "{msg}");
}

#[rstest]
fn wrong_type_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("typed.toml");
    fs::write(&path, "[batches]\ncount = \"three\"\n").unwrap();
    assert!(load_file(&path).is_err());
}
