//! EZ-Homelab: Deployment Wizard Library
//!
//! A library for configuring and deploying self-hosted homelab service
//! bundles via docker compose.

pub mod backup;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod report;
pub mod utils;
