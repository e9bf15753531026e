//! End-to-end tests of the binary's non-interactive modes

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ez_homelab() -> Command {
    Command::cargo_bin("ez-homelab").unwrap()
}

#[test]
fn test_help_lists_modes() {
    ez_homelab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--save-only"))
        .stdout(predicate::str::contains("--validate"))
        .stdout(predicate::str::contains("--uninstall"));
}

#[test]
fn test_version() {
    ez_homelab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_missing_settings_file() {
    let temp = TempDir::new().unwrap();
    ez_homelab()
        .arg("--validate")
        .arg("--env-file")
        .arg(temp.path().join("absent.env"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Missing settings file"));
}

#[test]
fn test_validate_passes_on_valid_file() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join(".env");
    common::write_valid_env(&env_file);

    ez_homelab()
        .arg("--validate")
        .arg("--env-file")
        .arg(&env_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("validation passed"));
}

#[test]
fn test_validate_reports_each_issue() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join(".env");
    std::fs::write(&env_file, "DOMAIN=bad.example.com\nPUID=1000\n").unwrap();

    ez_homelab()
        .arg("--validate")
        .arg("--env-file")
        .arg(&env_file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid domain format"))
        .stdout(predicate::str::contains("DUCKDNS_TOKEN"));
}

#[test]
fn test_health_on_empty_deployment_root() {
    let temp = TempDir::new().unwrap();
    ez_homelab()
        .arg("--health")
        .arg("--env-file")
        .arg(temp.path().join(".env"))
        .arg("--stacks-dir")
        .arg(temp.path().join("stacks"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No deployed bundles found"));
}

#[test]
fn test_conflicting_paths_still_parse() {
    // Path flags apply to every mode; parsing alone must not touch the disk
    let temp = TempDir::new().unwrap();
    ez_homelab()
        .arg("--validate")
        .arg("--env-file")
        .arg(temp.path().join("missing").join("deep").join(".env"))
        .assert()
        .failure();
}
