//! The fixed five-step deployment pipeline
//!
//! Steps run in order with fail-soft reporting: a failed step is recorded and
//! the pipeline keeps going so the final report shows everything that went
//! wrong, not just the first failure. Overall success requires steps 1-4;
//! the health check only degrades the report.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::ConfigStore;
use crate::report::{all_running, collect_health, display_health, BundleHealth};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_error, print_info,
    print_success, print_warning,
};

use super::compose::{has_compose_file, ComposeRunner};
use super::env_file::write_env;
use super::templates::{copy_bundle_templates, deployed_bundles, CopyOutcome};

/// Filesystem locations the pipeline operates on
#[derive(Debug, Clone)]
pub struct DeployPaths {
    /// Settings file written by the renderer and consumed by compose
    pub env_file: PathBuf,
    /// Deployment root that receives bundle template copies
    pub stacks_dir: PathBuf,
    /// Source tree of per-bundle deployment templates
    pub templates_dir: PathBuf,
}

/// Outcome of a single pipeline step
#[derive(Debug, Clone)]
pub struct StepResult {
    pub name: &'static str,
    pub ok: bool,
    pub detail: Option<String>,
}

/// Full fail-soft report for one deployment run
#[derive(Debug, Default)]
pub struct DeploymentReport {
    pub steps: Vec<StepResult>,
    pub bundle_errors: Vec<String>,
    pub health: Vec<BundleHealth>,
}

impl DeploymentReport {
    /// Deployment succeeded: settings, validation, templates, and launch all
    /// passed. Health-check degradation does not fail the run.
    pub fn success(&self) -> bool {
        self.steps
            .iter()
            .filter(|step| step.name != "health_check")
            .all(|step| step.ok)
    }

    fn record(&mut self, name: &'static str, ok: bool, detail: Option<String>) {
        self.steps.push(StepResult { name, ok, detail });
    }
}

const STEP_LABELS: [&str; 5] = [
    "Generating settings file",
    "Validating configuration",
    "Copying deployment templates",
    "Starting services",
    "Running post-deployment checks",
];

fn print_step_ok(label: &str) {
    println!("    {} {}", style("✓").green().bold(), label);
}

fn print_step_failed(label: &str) {
    println!("    {} {}", style("✗").red().bold(), label);
}

fn print_step_degraded(label: &str) {
    println!("    {} {}", style("⚠").yellow().bold(), label);
}

/// Run the five-step deployment pipeline
pub fn run_deployment(
    store: &ConfigStore,
    paths: &DeployPaths,
    runner: &ComposeRunner,
) -> Result<DeploymentReport> {
    println!();
    println!("    {}", style("Starting deployment...").blue().bold());
    println!();

    let mut report = DeploymentReport::default();

    // Step 1: render the settings file
    match write_env(store, &paths.env_file) {
        Ok(()) => {
            print_step_ok(STEP_LABELS[0]);
            report.record("env_generation", true, None);
        }
        Err(e) => {
            print_step_failed(STEP_LABELS[0]);
            report.record("env_generation", false, Some(e.to_string()));
        }
    }

    // Step 2: validate what was written
    match ConfigStore::validate_env_file(&paths.env_file) {
        Ok(issues) if issues.is_empty() => {
            print_step_ok(STEP_LABELS[1]);
            report.record("validation", true, None);
        }
        Ok(issues) => {
            print_step_failed(STEP_LABELS[1]);
            report.record("validation", false, Some(format!("{} issues found", issues.len())));
        }
        Err(e) => {
            print_step_failed(STEP_LABELS[1]);
            report.record("validation", false, Some(e.to_string()));
        }
    }

    // Step 3: copy bundle templates into the deployment root
    match copy_bundle_templates(store, &paths.templates_dir, &paths.stacks_dir) {
        Ok(outcomes) => {
            for (bundle, outcome) in &outcomes {
                if *outcome == CopyOutcome::MissingTemplate {
                    print_warning(&format!("Bundle {} not found in templates", bundle));
                }
            }
            print_step_ok(STEP_LABELS[2]);
            report.record("template_copy", true, None);
        }
        Err(e) => {
            print_step_failed(STEP_LABELS[2]);
            report.record("template_copy", false, Some(e.to_string()));
        }
    }

    // Step 4: bring services up, core first
    let runner_with_env = match runner.clone().with_env_file(&paths.env_file) {
        Ok(r) => r,
        Err(_) => runner.clone(),
    };
    let (launched, errors) = start_bundles(store, paths, &runner_with_env);
    report.bundle_errors = errors;
    if launched {
        print_step_ok(STEP_LABELS[3]);
        report.record("service_startup", true, None);
    } else {
        print_step_failed(STEP_LABELS[3]);
        report.record(
            "service_startup",
            false,
            Some(format!(
                "Service startup failed: {} errors",
                report.bundle_errors.len()
            )),
        );
    }

    // Step 5: shallow health poll; degraded, never fatal
    let health = collect_health(&paths.stacks_dir, &runner_with_env);
    if all_running(&health) {
        print_step_ok(STEP_LABELS[4]);
        report.record("health_check", true, None);
    } else {
        print_step_degraded(STEP_LABELS[4]);
        report.record("health_check", false, Some("Some services have issues".to_string()));
    }
    report.health = health;

    display_report(&report);
    Ok(report)
}

/// Launch every deployed bundle, core first.
///
/// A missing core compose file fails the launch outright; failures in the
/// remaining bundles are accumulated and reported.
pub fn start_bundles(
    store: &ConfigStore,
    paths: &DeployPaths,
    runner: &ComposeRunner,
) -> (bool, Vec<String>) {
    let mut errors = Vec::new();

    let core_dir = paths.stacks_dir.join("core");
    if !has_compose_file(&core_dir) {
        errors.push("Core docker-compose.yml not found".to_string());
        return (false, errors);
    }

    let mut core_ok = true;
    for bundle in deployed_bundles(store) {
        let bundle_dir = paths.stacks_dir.join(&bundle);
        if !has_compose_file(&bundle_dir) {
            continue;
        }
        let spinner = create_spinner(&format!("Starting {} services...", bundle));
        match runner.up(&bundle_dir) {
            Ok(()) => finish_with_success(&spinner, &format!("{} services started", bundle)),
            Err(e) => {
                finish_with_warning(&spinner, &format!("{} failed to start", bundle));
                errors.push(format!("{}: {}", bundle, e));
                if bundle == "core" {
                    core_ok = false;
                }
            }
        }
    }

    (core_ok, errors)
}

/// Print the final deployment outcome with accumulated errors
fn display_report(report: &DeploymentReport) {
    println!();
    if report.success() {
        print_success("Deployment completed successfully!");
        println!();
        println!(
            "    {}",
            style("Your services are now running!").cyan().bold()
        );
        println!("    Access them through Traefik reverse proxy with automatic SSL.");
        return;
    }

    print_warning("Deployment completed with issues");
    println!("    {}", style("Some services may not be fully operational.").yellow());

    if !report.bundle_errors.is_empty() {
        println!();
        println!("    {}", style("Service Startup Errors:").red().bold());
        for error in &report.bundle_errors {
            println!("      {} {}", style("•").red(), error);
        }
    }

    let failed: Vec<&StepResult> = report.steps.iter().filter(|s| !s.ok).collect();
    if !failed.is_empty() {
        println!();
        println!("    {}", style("Deployment Issues:").red().bold());
        for step in failed {
            if let Some(detail) = &step.detail {
                println!("      {} {}: {}", style("•").red(), step.name, detail);
            }
        }
    }

    display_health(&report.health);
}

/// Stop and remove every known bundle, then delete the deployment root.
///
/// Per-bundle errors are reported and do not stop the sweep. The caller is
/// responsible for confirmation.
pub fn uninstall(paths: &DeployPaths, runner: &ComposeRunner) -> Result<()> {
    let known_bundles = [
        "core",
        "infrastructure",
        "dashboards",
        "media",
        "media-management",
        "homeassistant",
        "productivity",
        "monitoring",
        "utilities",
    ];

    for bundle in known_bundles {
        let bundle_dir = paths.stacks_dir.join(bundle);
        if !has_compose_file(&bundle_dir) {
            continue;
        }
        print_info(&format!("Removing {} services...", bundle));
        if let Err(e) = runner
            .down(&bundle_dir, false)
            .and_then(|_| runner.down(&bundle_dir, true))
        {
            print_error(&format!("Error removing {}: {}", bundle, e));
            continue;
        }
        print_success(&format!("{} services removed", bundle));
    }

    if paths.stacks_dir.exists() {
        match fs::remove_dir_all(&paths.stacks_dir) {
            Ok(()) => print_success(&format!(
                "Removed deployment root: {}",
                paths.stacks_dir.display()
            )),
            Err(e) => print_error(&format!("Error removing deployment root: {}", e)),
        }
    }

    print_success("Uninstallation completed");
    Ok(())
}
