//! Configuration snapshots
//!
//! The store is serialized to timestamped JSON files under
//! `~/.ez-homelab/backups`. Filenames use a 24-hour timestamp so
//! lexicographic order matches chronological order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use dialoguer::Select;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigStore, DeploymentType, SelectedServices};
use crate::utils::{print_success, print_warning};

/// Serialized form of a configuration snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: String,
    pub deployment_type: Option<DeploymentType>,
    pub config: BTreeMap<String, String>,
    pub selected_services: SelectedServices,
}

impl Snapshot {
    pub fn from_store(store: &ConfigStore) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339(),
            deployment_type: store.deployment_type,
            config: store.settings.clone(),
            selected_services: store.selected.clone(),
        }
    }

    /// Load a snapshot back into the store
    pub fn apply(self, store: &mut ConfigStore) {
        store.settings = self.config;
        store.selected = self.selected_services;
        store.deployment_type = self.deployment_type;
    }
}

/// Default backup directory under the user's home, created on demand
pub fn default_backup_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".ez-homelab").join("backups");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create backup directory: {}", dir.display()))?;
    Ok(dir)
}

/// Write a snapshot of the store into `backup_dir`
pub fn snapshot_to(store: &ConfigStore, backup_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(backup_dir)
        .with_context(|| format!("Failed to create backup directory: {}", backup_dir.display()))?;

    let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = backup_dir.join(format!("config_backup_{}.json", stamp));

    let snapshot = Snapshot::from_store(store);
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write backup: {}", path.display()))?;

    print_success(&format!("Configuration backed up to {}", path.display()));
    Ok(path)
}

/// Snapshot to the default backup directory
pub fn snapshot(store: &ConfigStore) -> Result<PathBuf> {
    snapshot_to(store, &default_backup_dir()?)
}

/// Snapshot files in `backup_dir`, newest first
pub fn list_snapshots(backup_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut snapshots = Vec::new();
    if !backup_dir.is_dir() {
        return Ok(snapshots);
    }
    for entry in fs::read_dir(backup_dir)? {
        let path = entry?.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with("config_backup_") && name.ends_with(".json") {
            snapshots.push(path);
        }
    }
    snapshots.sort();
    snapshots.reverse();
    Ok(snapshots)
}

/// Read a snapshot file
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read backup: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse backup: {}", path.display()))
}

/// Offer the five most recent snapshots and restore the chosen one.
///
/// Returns `false` when there is nothing to restore or the user cancels.
pub fn restore_interactive(store: &mut ConfigStore, backup_dir: &Path) -> Result<bool> {
    let snapshots = list_snapshots(backup_dir)?;
    if snapshots.is_empty() {
        print_warning("No backups found");
        return Ok(false);
    }

    let choices: Vec<String> = snapshots
        .iter()
        .take(5)
        .map(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("backup")
                .trim_start_matches("config_backup_")
                .to_string()
        })
        .collect();

    let selection = Select::new()
        .with_prompt("Select backup to restore")
        .items(&choices)
        .default(0)
        .interact_opt()?;

    let Some(index) = selection else {
        return Ok(false);
    };

    let path = &snapshots[index];
    load_snapshot(path)?.apply(store);
    print_success(&format!(
        "Configuration restored from {}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("backup")
    ));
    Ok(true)
}
