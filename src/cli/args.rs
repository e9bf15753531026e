//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::deploy::DeployPaths;

/// EZ-Homelab - Interactive deployment wizard for self-hosted homelab stacks
#[derive(Parser, Debug)]
#[command(name = "ez-homelab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Automated deployment using the existing settings file, no prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Save configuration and templates without starting services
    #[arg(long)]
    pub save_only: bool,

    /// Backup the current configuration and exit
    #[arg(long)]
    pub backup: bool,

    /// Restore configuration from a backup and exit
    #[arg(long)]
    pub restore: bool,

    /// Validate the current settings file and exit
    #[arg(long)]
    pub validate: bool,

    /// Check service health status and exit
    #[arg(long)]
    pub health: bool,

    /// Stop and remove all deployed services
    #[arg(long)]
    pub uninstall: bool,

    /// Settings file location
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Deployment root that receives bundle template copies
    #[arg(long, default_value = "/opt/stacks")]
    pub stacks_dir: PathBuf,

    /// Source directory containing per-bundle deployment templates
    #[arg(long, default_value = "docker-compose")]
    pub templates_dir: PathBuf,
}

impl Cli {
    /// Filesystem locations the deployment pipeline operates on
    pub fn paths(&self) -> DeployPaths {
        DeployPaths {
            env_file: self.env_file.clone(),
            stacks_dir: self.stacks_dir.clone(),
            templates_dir: self.templates_dir.clone(),
        }
    }
}
