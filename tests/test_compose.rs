//! Compose runner tests against a stub docker executable

mod common;

use std::fs;

use tempfile::TempDir;

use ez_homelab::deploy::{has_compose_file, ComposeRunner};
use ez_homelab::report::{all_running, collect_health};

#[test]
fn test_docker_available_with_stub() {
    let temp = TempDir::new().unwrap();
    let stub = common::write_docker_stub(temp.path(), &[], false);
    let runner = ComposeRunner::new().with_binary(&stub);
    assert!(runner.docker_available());
}

#[test]
fn test_docker_unavailable_when_binary_missing() {
    let runner = ComposeRunner::new().with_binary("/nonexistent/docker-binary");
    assert!(!runner.docker_available());
}

#[test]
fn test_up_invokes_compose_in_bundle_dir() {
    let temp = TempDir::new().unwrap();
    let stub = common::write_docker_stub(temp.path(), &[], false);
    let bundle_dir = temp.path().join("core");
    fs::create_dir_all(&bundle_dir).unwrap();

    let runner = ComposeRunner::new().with_binary(&stub);
    runner.up(&bundle_dir).unwrap();

    let log = common::read_stub_log(temp.path());
    assert!(log.contains("compose up -d"));
}

#[test]
fn test_up_failure_surfaces_stderr() {
    let temp = TempDir::new().unwrap();
    let stub = common::write_docker_stub(temp.path(), &[], true);
    let bundle_dir = temp.path().join("core");
    fs::create_dir_all(&bundle_dir).unwrap();

    let runner = ComposeRunner::new().with_binary(&stub);
    let err = runner.up(&bundle_dir).unwrap_err();
    assert!(err.to_string().contains("address already in use"));
}

#[test]
fn test_down_with_and_without_volumes() {
    let temp = TempDir::new().unwrap();
    let stub = common::write_docker_stub(temp.path(), &[], false);
    let bundle_dir = temp.path().join("core");
    fs::create_dir_all(&bundle_dir).unwrap();

    let runner = ComposeRunner::new().with_binary(&stub);
    runner.down(&bundle_dir, false).unwrap();
    runner.down(&bundle_dir, true).unwrap();

    let log = common::read_stub_log(temp.path());
    assert!(log.contains("compose down\n"));
    assert!(log.contains("compose down -v\n"));
}

#[test]
fn test_ps_parses_json_lines() {
    let temp = TempDir::new().unwrap();
    let stub = common::write_docker_stub(temp.path(), &["traefik", "authelia"], false);
    let bundle_dir = temp.path().join("core");
    fs::create_dir_all(&bundle_dir).unwrap();

    let runner = ComposeRunner::new().with_binary(&stub);
    let services = runner.ps(&bundle_dir).unwrap();
    assert_eq!(services, vec!["traefik", "authelia"]);
}

#[test]
fn test_with_env_file_injects_variables() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join(".env");
    common::write_valid_env(&env_file);

    // Stub that echoes the injected variable back as a service name
    let script = "#!/bin/sh\necho \"{\\\"Service\\\": \\\"$DOMAIN\\\"}\"\nexit 0\n";
    let stub = temp.path().join("docker-echo");
    fs::write(&stub, script).unwrap();
    let mut perms = fs::metadata(&stub).unwrap().permissions();
    use std::os::unix::fs::PermissionsExt;
    perms.set_mode(0o755);
    fs::set_permissions(&stub, perms).unwrap();

    let bundle_dir = temp.path().join("core");
    fs::create_dir_all(&bundle_dir).unwrap();

    let runner = ComposeRunner::new()
        .with_binary(&stub)
        .with_env_file(&env_file)
        .unwrap();
    let services = runner.ps(&bundle_dir).unwrap();
    assert_eq!(services, vec!["testlab.duckdns.org"]);
}

#[test]
fn test_has_compose_file() {
    let temp = TempDir::new().unwrap();
    let bundle_dir = temp.path().join("core");
    fs::create_dir_all(&bundle_dir).unwrap();
    assert!(!has_compose_file(&bundle_dir));
    fs::write(bundle_dir.join("docker-compose.yml"), "services: {}\n").unwrap();
    assert!(has_compose_file(&bundle_dir));
}

#[test]
fn test_collect_health_core_first_and_degraded() {
    let temp = TempDir::new().unwrap();
    let stacks_dir = temp.path().join("stacks");
    for bundle in ["media", "core", "infrastructure"] {
        let dir = stacks_dir.join(bundle);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("docker-compose.yml"), "services: {}\n").unwrap();
    }
    // A directory without a compose file is not a bundle
    fs::create_dir_all(stacks_dir.join("scratch")).unwrap();

    let stub = common::write_docker_stub(temp.path(), &["svc"], false);
    let runner = ComposeRunner::new().with_binary(&stub);

    let statuses = collect_health(&stacks_dir, &runner);
    let bundles: Vec<&str> = statuses.iter().map(|s| s.bundle.as_str()).collect();
    assert_eq!(bundles, vec!["core", "infrastructure", "media"]);
    assert!(all_running(&statuses));

    // A failing docker binary degrades every bundle instead of erroring
    let broken = ComposeRunner::new().with_binary("/nonexistent/docker-binary");
    let statuses = collect_health(&stacks_dir, &broken);
    assert!(!all_running(&statuses));
    assert!(statuses.iter().all(|s| !s.running && s.services.is_empty()));
}
