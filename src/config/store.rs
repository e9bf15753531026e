//! In-memory configuration store backed by the generated settings file
//!
//! The store holds flat key-value settings plus the selected-services map.
//! It is populated from an existing `.env` file when one is present, then
//! refined by the interactive prompts before the renderer writes it back out.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::stacks::{DeploymentType, SelectedServices};

/// Settings keys merged back in from an existing settings file
const WELL_KNOWN_KEYS: &[&str] = &[
    "DOMAIN",
    "PUID",
    "PGID",
    "TZ",
    "DEPLOYMENT_TYPE",
    "DEFAULT_USER",
    "DEFAULT_PASSWORD",
    "DEFAULT_EMAIL",
];

/// Keys that must be present and non-empty for a valid deployment
const REQUIRED_KEYS: &[&str] = &["DOMAIN", "DUCKDNS_TOKEN", "PUID", "PGID", "TZ"];

/// Authelia secrets that must meet a minimum length
const AUTH_SECRET_KEYS: &[&str] = &[
    "AUTHELIA_JWT_SECRET",
    "AUTHELIA_SESSION_SECRET",
    "AUTHELIA_STORAGE_ENCRYPTION_KEY",
];

const MIN_SECRET_LEN: usize = 32;

/// Errors raised while loading or parsing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// In-memory key-value settings plus the selected-services map
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    pub settings: BTreeMap<String, String>,
    pub selected: SelectedServices,
    pub deployment_type: Option<DeploymentType>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Value for `key`, or `fallback` when unset or empty
    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        match self.settings.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => fallback,
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), value.into());
    }

    /// Merge well-known settings from an existing settings file.
    ///
    /// Returns `true` if the file existed and was loaded. A missing file is
    /// not an error: it simply means a fresh configuration.
    pub fn load_env_file(&mut self, path: &Path) -> Result<bool, ConfigError> {
        if !path.exists() {
            return Ok(false);
        }
        if path.is_dir() {
            return Err(ConfigError::Config(format!(
                "Settings path is a directory: {}",
                path.display()
            )));
        }

        let vars = parse_env_content(&fs::read_to_string(path)?);
        for key in WELL_KNOWN_KEYS {
            if let Some(value) = vars.get(*key) {
                self.settings.insert(key.to_string(), value.clone());
            }
        }
        if let Some(dt) = vars.get("DEPLOYMENT_TYPE").and_then(|v| DeploymentType::parse(v)) {
            self.deployment_type = Some(dt);
        }
        Ok(true)
    }

    /// Validate a rendered settings file, returning every issue found.
    ///
    /// An empty list means the configuration is deployable. Checks are
    /// collected rather than fail-fast so the user sees the full picture.
    pub fn validate_env_file(path: &Path) -> Result<Vec<String>, ConfigError> {
        if !path.exists() {
            return Ok(vec![format!("Missing settings file: {}", path.display())]);
        }

        let vars = parse_env_content(&fs::read_to_string(path)?);
        let mut issues = Vec::new();

        for key in REQUIRED_KEYS {
            match vars.get(*key) {
                Some(value) if !value.is_empty() => {}
                _ => issues.push(format!("Missing or empty required variable: {}", key)),
            }
        }

        if let Some(domain) = vars.get("DOMAIN") {
            if !domain.is_empty() && !validate_domain(domain) {
                issues.push(format!("Invalid domain format: {}", domain));
            }
        }

        for key in AUTH_SECRET_KEYS {
            if let Some(secret) = vars.get(*key) {
                if secret.len() < MIN_SECRET_LEN {
                    issues.push(format!("Authelia secret too short: {}", key));
                }
            }
        }

        Ok(issues)
    }
}

/// Parse `KEY=VALUE` lines, skipping comments and blanks.
///
/// Only the first `=` splits, so values may themselves contain `=` (base64
/// secrets, connection strings).
pub fn parse_env_content(content: &str) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            vars.insert(key.trim().to_string(), value.to_string());
        }
    }
    vars
}

/// Check the `<subdomain>.duckdns.org` domain format
pub fn validate_domain(domain: &str) -> bool {
    let Some(label) = domain.strip_suffix(".duckdns.org") else {
        return false;
    };
    !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
