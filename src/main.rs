//! EZ-Homelab: Interactive Deployment Wizard
//!
//! Collects deployment choices for a homelab stack, renders the settings
//! file, copies deployment templates, and brings services up via the
//! external docker compose CLI.

mod backup;
mod cli;
mod config;
mod deploy;
mod report;
mod utils;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::{confirm_step, run_wizard, show_summary_and_confirm, Cli};
use config::ConfigStore;
use deploy::{copy_bundle_templates, run_deployment, uninstall, write_env, ComposeRunner, DeployPaths};
use report::{collect_health, display_health};
use utils::{print_banner, print_error, print_info, print_success, print_warning};

fn main() {
    let cli = Cli::parse();
    std::process::exit(match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("{:#}", e));
            1
        }
    });
}

fn run(cli: &Cli) -> Result<i32> {
    let paths = cli.paths();

    // Special operation modes, each a single action then exit
    if cli.backup {
        let store = load_store(&paths)?;
        backup::snapshot(&store)?;
        return Ok(0);
    }
    if cli.restore {
        let mut store = load_store(&paths)?;
        let restored = backup::restore_interactive(&mut store, &backup::default_backup_dir()?)?;
        return Ok(if restored { 0 } else { 1 });
    }
    if cli.validate {
        return run_validate(&paths);
    }
    if cli.health {
        let runner = compose_runner(&paths);
        let statuses = collect_health(&paths.stacks_dir, &runner);
        display_health(&statuses);
        return Ok(0);
    }
    if cli.uninstall {
        print_warning("This will stop and remove all deployed services");
        if !confirm_step("Are you sure you want to uninstall all services?", false)? {
            return Ok(1);
        }
        uninstall(&paths, &compose_runner(&paths))?;
        return Ok(0);
    }

    if cli.yes {
        return run_automated(&paths);
    }
    if cli.save_only {
        return run_save_only(&paths);
    }

    run_interactive(&paths)
}

/// Full interactive flow: banner, preflight, prompts, confirmation, pipeline
fn run_interactive(paths: &DeployPaths) -> Result<i32> {
    print_banner(env!("CARGO_PKG_VERSION"));

    if !run_preflight_checks(paths) {
        return Ok(1);
    }

    let mut store = load_store(paths)?;

    if !run_wizard(&mut store)? {
        println!("Cancelled by user.");
        return Ok(1);
    }

    if !show_summary_and_confirm(&store)? {
        println!("Cancelled by user.");
        return Ok(1);
    }

    utils::print_config(&store, &paths.env_file, &paths.stacks_dir);

    // Snapshot the configuration before the pipeline touches anything
    if let Err(e) = backup::snapshot(&store) {
        print_warning(&format!("Backup skipped: {}", e));
    }

    let report = run_deployment(&store, paths, &ComposeRunner::new())?;

    if report.success() {
        print_next_steps(&store);
        utils::print_completion();
        Ok(0)
    } else {
        println!();
        print_error("EZ-Homelab setup completed with errors.");
        println!(
            "    Common issues: port conflicts, missing dependencies, network issues."
        );
        Ok(1)
    }
}

/// `--yes`: deploy from the existing settings file without prompting
fn run_automated(paths: &DeployPaths) -> Result<i32> {
    print_success("Automated deployment mode selected");
    let store = load_store(paths)?;

    if let Err(e) = backup::snapshot(&store) {
        print_warning(&format!("Backup skipped: {}", e));
    }

    let report = run_deployment(&store, paths, &ComposeRunner::new())?;
    Ok(if report.success() { 0 } else { 1 })
}

/// `--save-only`: collect configuration and write everything, skip launch
fn run_save_only(paths: &DeployPaths) -> Result<i32> {
    print_warning("Save-only mode selected");
    let mut store = load_store(paths)?;

    if !run_wizard(&mut store)? {
        println!("Cancelled by user.");
        return Ok(1);
    }

    write_env(&store, &paths.env_file)?;
    print_success(&format!("Settings saved as: {}", paths.env_file.display()));

    let outcomes = copy_bundle_templates(&store, &paths.templates_dir, &paths.stacks_dir)?;
    for (bundle, outcome) in &outcomes {
        match outcome {
            deploy::CopyOutcome::Copied => {
                print_info(&format!("Copied {} stack to {}", bundle, paths.stacks_dir.display()))
            }
            deploy::CopyOutcome::MissingTemplate => {
                print_warning(&format!("Bundle {} not found in templates", bundle))
            }
        }
    }

    print_success("Configuration saved successfully!");
    Ok(0)
}

/// `--validate`: report every configuration issue, exit 0 iff clean
fn run_validate(paths: &DeployPaths) -> Result<i32> {
    let issues = ConfigStore::validate_env_file(&paths.env_file)?;
    if issues.is_empty() {
        print_success("Configuration validation passed");
        Ok(0)
    } else {
        print_error("Configuration validation failed:");
        for issue in &issues {
            println!("      - {}", issue);
        }
        Ok(1)
    }
}

/// Pre-flight system checks: docker availability is fatal, the rest advisory
fn run_preflight_checks(paths: &DeployPaths) -> bool {
    println!("    {}", style("Running pre-flight checks...").blue().bold());

    let mut checks_passed = true;

    if ComposeRunner::new().docker_available() {
        print_success("Docker available");
    } else {
        print_error("Docker not available");
        checks_passed = false;
    }

    match utils::effective_uid() {
        Some(0) => print_success("Running as root"),
        _ => print_warning("Not running as root (may need privileges for the deployment root)"),
    }

    if paths.env_file.exists() {
        print_info(&format!(
            "Existing settings file found: {}",
            paths.env_file.display()
        ));
    } else {
        print_info("No settings file found, will create new configuration");
    }

    println!();
    checks_passed
}

/// Load the store, merging any existing settings file
fn load_store(paths: &DeployPaths) -> Result<ConfigStore> {
    let mut store = ConfigStore::new();
    if store.load_env_file(&paths.env_file)? {
        print_info("Loaded existing settings file");
    }
    Ok(store)
}

/// Post-deployment pointers printed after a successful interactive run
fn print_next_steps(store: &ConfigStore) {
    let domain = store.get_or("DOMAIN", "yourdomain.duckdns.org");
    println!();
    println!("    {}", style("Next Steps:").cyan().bold());
    println!("      1. Access your services at:");
    println!("         • Homepage: https://home.{}", domain);
    println!("         • Dockge:   https://dockge.{}", domain);
    println!("         • Authelia: https://auth.{}", domain);
    println!("      2. Default login credentials:");
    println!("         • Username: {}", store.get_or("DEFAULT_USER", "admin"));
    println!(
        "         • Password: {}",
        store.get_or("DEFAULT_PASSWORD", "changeme")
    );
    println!("      3. Change default passwords immediately!");
    println!("      4. Configure your domain DNS and DuckDNS token");
    println!();
    println!(
        "    {}",
        style("For help, visit: https://github.com/kelinfoxy/EZ-Homelab").dim()
    );
}

/// Compose runner with the settings file's variables when it exists
fn compose_runner(paths: &DeployPaths) -> ComposeRunner {
    let runner = ComposeRunner::new();
    if paths.env_file.exists() {
        if let Ok(with_env) = runner.clone().with_env_file(&paths.env_file) {
            return with_env;
        }
    }
    runner
}
