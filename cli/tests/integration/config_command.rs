//! Integration tests for `dlab config` command.
//!
//! All filesystem-touching tests set `DLAB_CONFIG` to a temp path so they
//! never read or write `~/.dlab/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::dlab;

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    dlab()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    dlab()
        .args(["config", "show"])
        .env("DLAB_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("terraform.timeout_secs:"))
        .stdout(predicate::str::contains("3600"));
}

#[test]
fn test_config_set_then_show_json() {
    let (_dir, path) = temp_config_path();
    dlab()
        .args(["config", "set", "terraform.workdir", "/srv/tf"])
        .env("DLAB_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set terraform.workdir = /srv/tf"));

    let out = dlab()
        .args(["--json", "config", "show"])
        .env("DLAB_CONFIG", &path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(value["config"]["terraform"]["workdir"], "/srv/tf");
    assert_eq!(value["path"], path.as_str());
}

#[test]
fn test_config_flag_wins_over_env() {
    let (_dir, env_path) = temp_config_path();
    let (_dir2, flag_path) = temp_config_path();
    dlab()
        .args(["--config", &flag_path, "config", "set", "terraform.timeout_secs", "90"])
        .env("DLAB_CONFIG", &env_path)
        .assert()
        .success();
    assert!(std::path::Path::new(&flag_path).exists());
    assert!(!std::path::Path::new(&env_path).exists());
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    dlab()
        .args(["config", "set", "terraform.state", "x"])
        .env("DLAB_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_set_invalid_timeout_fails() {
    let (_dir, path) = temp_config_path();
    dlab()
        .args(["config", "set", "terraform.timeout_secs", "0"])
        .env("DLAB_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value"));
}
