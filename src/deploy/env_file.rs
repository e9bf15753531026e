//! Settings file renderer
//!
//! Turns the configuration store into the `.env` file consumed by the
//! docker compose service definitions: identity, domain, default credentials,
//! freshly generated auth secrets, and per-service defaults keyed off the
//! shared admin credentials.
//!
//! Secrets are regenerated on every render; the settings file is their only
//! persistence.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rand::RngCore;

use crate::config::ConfigStore;

/// Length in bytes of the generated Authelia secrets (128 hex chars)
const SECRET_BYTES: usize = 64;

/// Generate a random lowercase-hex secret
pub fn generate_secret_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hostname reported in the settings file
fn server_hostname(store: &ConfigStore) -> String {
    if let Some(host) = store.get("SERVER_HOSTNAME") {
        if !host.is_empty() {
            return host.to_string();
        }
    }
    std::env::var("HOSTNAME").unwrap_or_else(|_| "homelab".to_string())
}

/// Render the full settings file body for the current configuration
pub fn render_env(store: &ConfigStore) -> String {
    let domain = store.get_or("DOMAIN", "yourdomain.duckdns.org");
    let duckdns_subdomain = domain.split('.').next().unwrap_or("yourdomain");

    let default_user = store.get_or("DEFAULT_USER", "admin").to_string();
    let default_password = store.get_or("DEFAULT_PASSWORD", "changeme").to_string();
    let fallback_email = format!("{}@{}", default_user, domain);
    let default_email = store.get_or("DEFAULT_EMAIL", &fallback_email).to_string();

    let jwt_secret = generate_secret_hex(SECRET_BYTES);
    let session_secret = generate_secret_hex(SECRET_BYTES);
    let encryption_key = generate_secret_hex(SECRET_BYTES);

    let deployment_type = store
        .deployment_type
        .map(|dt| dt.as_str())
        .unwrap_or("single");

    format!(
        "\
# EZ-Homelab Configuration - Generated by ez-homelab
# Generated on: {timestamp}

# User and Group IDs for file permissions
PUID={puid}
PGID={pgid}

TZ={tz}

# Configuration for this server
SERVER_IP={server_ip}
SERVER_HOSTNAME={server_hostname}

# Domain & DuckDNS Configuration
DUCKDNS_SUBDOMAINS={duckdns_subdomain}
DOMAIN={domain}
DUCKDNS_TOKEN={duckdns_token}

# Default credentials (used by multiple services)
DEFAULT_USER={default_user}
DEFAULT_PASSWORD={default_password}
DEFAULT_EMAIL={default_email}

# DIRECTORY PATHS
USERDIR=/opt/stacks
MEDIADIR=/mnt/media
DOWNLOADDIR=/mnt/downloads
PROJECTDIR=~/projects

# Deployment Configuration
DEPLOYMENT_TYPE={deployment_type}

# AUTHELIA SSO CONFIGURATION
AUTHELIA_JWT_SECRET={jwt_secret}
AUTHELIA_SESSION_SECRET={session_secret}
AUTHELIA_STORAGE_ENCRYPTION_KEY={encryption_key}

# Let's Encrypt / ACME (for SSL certificates)
ACME_EMAIL={default_email}
ADMIN_EMAIL={default_email}

# VPN Configuration (Surfshark - RECOMMENDED)
SURFSHARK_USERNAME={surfshark_user}
SURFSHARK_PASSWORD={surfshark_pass}
VPN_SERVER_COUNTRIES=Netherlands

# INFRASTRUCTURE SERVICES
PIHOLE_PASSWORD={default_password}

# qBittorrent
QBITTORRENT_USER=admin
QBITTORRENT_PASS={default_password}

# GRAFANA
GRAFANA_ADMIN_PASSWORD={default_password}

# VS Code Server
CODE_SERVER_PASSWORD={default_password}
CODE_SERVER_SUDO_PASSWORD={default_password}

# Jupyter Notebook
JUPYTER_TOKEN={default_password}

# DATABASES - GENERAL
POSTGRES_USER={default_user}
POSTGRES_PASSWORD={default_password}
POSTGRES_DB=homelab
PGADMIN_EMAIL={default_email}
PGADMIN_PASSWORD={default_password}

# Nextcloud
NEXTCLOUD_ADMIN_USER={default_user}
NEXTCLOUD_ADMIN_PASSWORD={default_password}
NEXTCLOUD_DB_PASSWORD={default_password}
NEXTCLOUD_DB_ROOT_PASSWORD={default_password}

# Gitea
GITEA_DB_PASSWORD={default_password}

# WordPress
WORDPRESS_DB_PASSWORD={default_password}
WORDPRESS_DB_ROOT_PASSWORD={default_password}

# BookStack
BOOKSTACK_DB_PASSWORD={default_password}
BOOKSTACK_DB_ROOT_PASSWORD={default_password}

# MediaWiki
MEDIAWIKI_DB_PASSWORD={default_password}
MEDIAWIKI_DB_ROOT_PASSWORD={default_password}

# Bitwarden (Vaultwarden)
BITWARDEN_ADMIN_TOKEN={default_password}
BITWARDEN_SIGNUPS_ALLOWED=true
BITWARDEN_INVITATIONS_ALLOWED=true

# Form.io
FORMIO_JWT_SECRET={default_password}
FORMIO_DB_SECRET={default_password}

# HOMEPAGE DASHBOARD - API KEYS (uncomment and configure as needed)
# HOMEPAGE_VAR_DOMAIN={domain}
# HOMEPAGE_VAR_SERVER_IP={server_ip}
# HOMEPAGE_VAR_GRAFANA_USER=admin
# HOMEPAGE_VAR_GRAFANA_PASS={default_password}
",
        timestamp = Local::now().format("%Y-%m-%d %H:%M:%S"),
        puid = store.get_or("PUID", "1000"),
        pgid = store.get_or("PGID", "1000"),
        tz = store.get_or("TZ", "America/New_York"),
        server_ip = store.get_or("SERVER_IP", "192.168.1.100"),
        server_hostname = server_hostname(store),
        duckdns_subdomain = duckdns_subdomain,
        domain = domain,
        duckdns_token = store.get_or("DUCKDNS_TOKEN", "your-duckdns-token"),
        default_user = default_user,
        default_password = default_password,
        default_email = default_email,
        deployment_type = deployment_type,
        jwt_secret = jwt_secret,
        session_secret = session_secret,
        encryption_key = encryption_key,
        surfshark_user = store.get_or("SURFSHARK_USERNAME", "your-surfshark-username"),
        surfshark_pass = store.get_or("SURFSHARK_PASSWORD", "your-surfshark-password"),
    )
}

/// Render and write the settings file
pub fn write_env(store: &ConfigStore, path: &Path) -> Result<()> {
    let content = render_env(store);
    fs::write(path, content)
        .with_context(|| format!("Failed to create settings file: {}", path.display()))?;
    Ok(())
}
