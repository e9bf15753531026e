//! Configuration snapshot tests

mod common;

use std::fs;

use tempfile::TempDir;

use ez_homelab::backup::{list_snapshots, load_snapshot, snapshot_to, Snapshot};
use ez_homelab::config::{AdditionalStack, ConfigStore, DeploymentType};

#[test]
fn test_snapshot_roundtrip() {
    let temp = TempDir::new().unwrap();
    let store = common::single_server_store();

    let path = snapshot_to(&store, temp.path()).unwrap();
    assert!(path.is_file());
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("config_backup_"));
    assert!(name.ends_with(".json"));

    let snapshot = load_snapshot(&path).unwrap();
    assert_eq!(snapshot.deployment_type, Some(DeploymentType::Single));
    assert_eq!(
        snapshot.config.get("DOMAIN").unwrap(),
        "testlab.duckdns.org"
    );
    assert!(snapshot
        .selected_services
        .additional
        .contains(&AdditionalStack::Media));
}

#[test]
fn test_apply_restores_store_state() {
    let temp = TempDir::new().unwrap();
    let original = common::single_server_store();
    let path = snapshot_to(&original, temp.path()).unwrap();

    let mut restored = ConfigStore::new();
    load_snapshot(&path).unwrap().apply(&mut restored);

    assert_eq!(restored.settings, original.settings);
    assert_eq!(restored.selected, original.selected);
    assert_eq!(restored.deployment_type, original.deployment_type);
}

#[test]
fn test_list_snapshots_newest_first() {
    let temp = TempDir::new().unwrap();
    // Timestamped names sort lexicographically in chronological order
    for stamp in [
        "2026-08-29_09-00-00",
        "2026-08-30_18-30-00",
        "2026-08-30_07-15-00",
    ] {
        fs::write(
            temp.path().join(format!("config_backup_{}.json", stamp)),
            "{}",
        )
        .unwrap();
    }
    // Non-snapshot files are ignored
    fs::write(temp.path().join("notes.txt"), "x").unwrap();

    let snapshots = list_snapshots(temp.path()).unwrap();
    let names: Vec<&str> = snapshots
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "config_backup_2026-08-30_18-30-00.json",
            "config_backup_2026-08-30_07-15-00.json",
            "config_backup_2026-08-29_09-00-00.json",
        ]
    );
}

#[test]
fn test_list_snapshots_empty_dir() {
    let temp = TempDir::new().unwrap();
    assert!(list_snapshots(temp.path()).unwrap().is_empty());
    assert!(list_snapshots(&temp.path().join("missing")).unwrap().is_empty());
}

#[test]
fn test_load_snapshot_rejects_malformed_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config_backup_bad.json");
    fs::write(&path, "not json").unwrap();
    assert!(load_snapshot(&path).is_err());
}

#[test]
fn test_snapshot_tolerates_partial_services() {
    // Older snapshots may omit selection fields entirely
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config_backup_old.json");
    fs::write(
        &path,
        r#"{"timestamp": "2026-08-01T00:00:00+00:00", "deployment_type": "core", "config": {}, "selected_services": {}}"#,
    )
    .unwrap();

    let snapshot: Snapshot = load_snapshot(&path).unwrap();
    assert_eq!(snapshot.deployment_type, Some(DeploymentType::Core));
    assert!(snapshot.selected_services.core.is_empty());
}
