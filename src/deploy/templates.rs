//! Deployment template copying
//!
//! Each bundle ships a template directory (compose file plus service config)
//! under the repository's `docker-compose/` tree. Selected bundles are copied
//! into the deployment root, replacing any previous copy so re-deploys pick
//! up template updates.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{ConfigStore, DeploymentType};

/// Result of copying one bundle's templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The bundle has no template directory; reported as a warning upstream
    MissingTemplate,
}

/// Bundle template directories to deploy, in launch order.
///
/// Core always comes first. Single-server deployments add every selected
/// bundle; core-only deployments add infrastructure when selected; remote
/// deployments configure core routing only.
pub fn deployed_bundles(store: &ConfigStore) -> Vec<String> {
    let mut bundles = vec!["core".to_string()];

    match store.deployment_type {
        Some(DeploymentType::Single) => {
            if !store.selected.infrastructure.is_empty() {
                bundles.push("infrastructure".to_string());
            }
            if !store.selected.dashboards.is_empty() {
                bundles.push("dashboards".to_string());
            }
            for stack in &store.selected.additional {
                bundles.push(stack.dir_name().to_string());
            }
        }
        Some(DeploymentType::Core) => {
            if !store.selected.infrastructure.is_empty() {
                bundles.push("infrastructure".to_string());
            }
        }
        Some(DeploymentType::Remote) | None => {}
    }

    bundles
}

/// Copy one bundle's template directory into the deployment root
pub fn copy_bundle(templates_dir: &Path, stacks_dir: &Path, bundle: &str) -> Result<CopyOutcome> {
    let source = templates_dir.join(bundle);
    if !source.is_dir() {
        return Ok(CopyOutcome::MissingTemplate);
    }

    let dest = stacks_dir.join(bundle);
    if dest.exists() {
        fs::remove_dir_all(&dest)
            .with_context(|| format!("Failed to remove previous copy: {}", dest.display()))?;
    }
    copy_dir_recursive(&source, &dest)?;
    Ok(CopyOutcome::Copied)
}

/// Copy every deployed bundle's templates, returning (bundle, outcome) pairs
pub fn copy_bundle_templates(
    store: &ConfigStore,
    templates_dir: &Path,
    stacks_dir: &Path,
) -> Result<Vec<(String, CopyOutcome)>> {
    fs::create_dir_all(stacks_dir)
        .with_context(|| format!("Failed to create deployment root: {}", stacks_dir.display()))?;

    let mut outcomes = Vec::new();
    for bundle in deployed_bundles(store) {
        let outcome = copy_bundle(templates_dir, stacks_dir, &bundle)?;
        outcomes.push((bundle, outcome));
    }
    Ok(outcomes)
}

fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create directory: {}", dest.display()))?;
    for entry in fs::read_dir(source)
        .with_context(|| format!("Failed to read template directory: {}", source.display()))?
    {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy template file: {}", entry.path().display())
            })?;
        }
    }
    Ok(())
}
