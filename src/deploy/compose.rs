//! Wrapper around the external `docker compose` CLI
//!
//! All container lifecycle work is delegated to docker; this module only
//! spawns the CLI, injects the settings file's variables into the child
//! environment, and surfaces captured stderr on failure.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};

use crate::config::parse_env_content;

/// Compose file name expected inside every deployed bundle directory
pub const COMPOSE_FILE: &str = "docker-compose.yml";

/// Invokes `docker compose` per bundle directory
#[derive(Debug, Clone)]
pub struct ComposeRunner {
    docker_bin: PathBuf,
    env: BTreeMap<String, String>,
}

impl Default for ComposeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeRunner {
    pub fn new() -> Self {
        Self {
            docker_bin: PathBuf::from("docker"),
            env: BTreeMap::new(),
        }
    }

    /// Override the docker binary (tests point this at a stub script)
    pub fn with_binary(mut self, bin: impl Into<PathBuf>) -> Self {
        self.docker_bin = bin.into();
        self
    }

    /// Load the settings file and inject its variables into every invocation
    pub fn with_env_file(mut self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        self.env = parse_env_content(&content);
        Ok(self)
    }

    /// Check that the docker CLI is present and responding
    pub fn docker_available(&self) -> bool {
        Command::new(&self.docker_bin)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// `docker compose up -d` in the bundle directory
    pub fn up(&self, bundle_dir: &Path) -> Result<()> {
        self.run(bundle_dir, &["compose", "up", "-d"]).map(|_| ())
    }

    /// `docker compose down [-v]` in the bundle directory
    pub fn down(&self, bundle_dir: &Path, remove_volumes: bool) -> Result<()> {
        let args: &[&str] = if remove_volumes {
            &["compose", "down", "-v"]
        } else {
            &["compose", "down"]
        };
        self.run(bundle_dir, args).map(|_| ())
    }

    /// Running service names per `docker compose ps --format json`.
    ///
    /// Compose emits one JSON object per line; lines that fail to parse are
    /// skipped rather than failing the whole poll.
    pub fn ps(&self, bundle_dir: &Path) -> Result<Vec<String>> {
        let stdout = self.run(bundle_dir, &["compose", "ps", "--format", "json"])?;
        let mut services = Vec::new();
        for line in stdout.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(line) {
                if let Some(service) = value.get("Service").and_then(|s| s.as_str()) {
                    services.push(service.to_string());
                }
            }
        }
        Ok(services)
    }

    fn run(&self, bundle_dir: &Path, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.docker_bin)
            .args(args)
            .current_dir(bundle_dir)
            .envs(&self.env)
            .output()
            .with_context(|| {
                format!(
                    "Failed to run {} {} - is docker installed?",
                    self.docker_bin.display(),
                    args.join(" ")
                )
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(anyhow!(
                "{} {} failed: {}",
                self.docker_bin.display(),
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            ))
        }
    }
}

/// Whether a bundle directory is deployable (has a compose file)
pub fn has_compose_file(bundle_dir: &Path) -> bool {
    bundle_dir.join(COMPOSE_FILE).is_file()
}
