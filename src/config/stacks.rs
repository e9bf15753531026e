//! Static catalog of deployable service bundles
//!
//! A bundle is a named group of services that shares one deployment-template
//! directory and one `docker compose` invocation. The core bundle is implied
//! by every deployment type and is always brought up first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Core services deployed with every configuration
pub const CORE_SERVICES: &[(&str, &str)] = &[
    ("DuckDNS", "Dynamic DNS with Let's Encrypt"),
    ("Traefik", "Reverse proxy with SSL termination"),
    ("Authelia", "SSO authentication service"),
    ("Sablier", "Lazy loading service"),
];

/// Infrastructure services offered during single-server selection
pub const INFRASTRUCTURE_SERVICES: &[(&str, &str)] = &[
    ("Pi-hole", "DNS ad blocker"),
    ("Dockge", "Docker stack manager"),
    ("Portainer", "Docker container manager"),
    ("Dozzle", "Docker log viewer"),
    ("Glances", "System monitoring"),
];

/// Dashboard services (choose one or none)
pub const DASHBOARD_SERVICES: &[(&str, &str)] = &[
    ("Homepage", "Service dashboard"),
    ("Homarr", "Modern dashboard"),
];

/// Additional service stacks with their bundled contents
pub const ADDITIONAL_STACKS: &[(AdditionalStack, &str)] = &[
    (AdditionalStack::Media, "Jellyfin, Calibre-Web"),
    (
        AdditionalStack::MediaManagement,
        "*arr services (Sonarr, Radarr, etc.)",
    ),
    (AdditionalStack::HomeAutomation, "Home Assistant, Node-RED"),
    (AdditionalStack::Productivity, "Nextcloud, Gitea, Mealie"),
    (AdditionalStack::Monitoring, "Grafana, Prometheus, Uptime Kuma"),
    (AdditionalStack::Utilities, "Vaultwarden, Backrest, Duplicati"),
];

/// How the homelab is being deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    /// Everything on one machine
    Single,
    /// Core infrastructure only (DNS, proxy, auth)
    Core,
    /// Routing configuration for services hosted elsewhere
    Remote,
}

impl DeploymentType {
    /// Stable serialized name, used in the settings file
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::Single => "single",
            DeploymentType::Core => "core",
            DeploymentType::Remote => "remote",
        }
    }

    /// Human-readable name shown in prompts and summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            DeploymentType::Single => "Single Server Full Stack",
            DeploymentType::Core => "Core Server Only",
            DeploymentType::Remote => "Remote Server",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(DeploymentType::Single),
            // Older settings files wrote "core-only"
            "core" | "core-only" => Some(DeploymentType::Core),
            "remote" => Some(DeploymentType::Remote),
            _ => None,
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional service stacks beyond core/infrastructure/dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdditionalStack {
    Media,
    MediaManagement,
    HomeAutomation,
    Productivity,
    Monitoring,
    Utilities,
}

impl AdditionalStack {
    /// Display name used in prompts and the selection summary
    pub fn display_name(&self) -> &'static str {
        match self {
            AdditionalStack::Media => "Media",
            AdditionalStack::MediaManagement => "Media Management",
            AdditionalStack::HomeAutomation => "Home Automation",
            AdditionalStack::Productivity => "Productivity",
            AdditionalStack::Monitoring => "Monitoring",
            AdditionalStack::Utilities => "Utilities",
        }
    }

    /// Name of the deployment-template directory for this stack
    pub fn dir_name(&self) -> &'static str {
        match self {
            AdditionalStack::Media => "media",
            AdditionalStack::MediaManagement => "media-management",
            AdditionalStack::HomeAutomation => "homeassistant",
            AdditionalStack::Productivity => "productivity",
            AdditionalStack::Monitoring => "monitoring",
            AdditionalStack::Utilities => "utilities",
        }
    }

    /// Description of the bundled services
    pub fn description(&self) -> &'static str {
        ADDITIONAL_STACKS
            .iter()
            .find(|(stack, _)| stack == self)
            .map(|(_, desc)| *desc)
            .unwrap_or("")
    }

    pub fn all() -> Vec<AdditionalStack> {
        ADDITIONAL_STACKS.iter().map(|(stack, _)| *stack).collect()
    }
}

impl fmt::Display for AdditionalStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Services and stacks the user has enabled, grouped by bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedServices {
    /// Core service names (required, populated for every deployment type)
    #[serde(default)]
    pub core: Vec<String>,
    /// Selected infrastructure service names
    #[serde(default)]
    pub infrastructure: Vec<String>,
    /// Selected dashboard service names
    #[serde(default)]
    pub dashboards: Vec<String>,
    /// Selected additional stacks
    #[serde(default)]
    pub additional: Vec<AdditionalStack>,
    /// Remote deployments only configure routing, no local selection
    #[serde(default)]
    pub remote_config: bool,
}

impl SelectedServices {
    /// Enable the full core bundle
    pub fn with_core() -> Self {
        Self {
            core: CORE_SERVICES.iter().map(|(name, _)| name.to_string()).collect(),
            ..Default::default()
        }
    }
}
