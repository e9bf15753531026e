//! Interactive configuration wizard
//!
//! Walks the user through deployment type, domain, default credentials, and
//! per-type service selection, accumulating answers in the configuration
//! store. Each step clears the screen, re-shows the banner, and prints the
//! running configuration so the user always sees what has been decided.
//!
//! Cancelling any prompt aborts the wizard; `run_wizard` then returns
//! `Ok(false)` and nothing is written.

use anyhow::Result;
use console::{style, Term};

use crate::config::{
    validate_domain, ConfigStore, DeploymentType, SelectedServices, ADDITIONAL_STACKS,
    DASHBOARD_SERVICES, INFRASTRUCTURE_SERVICES,
};
use crate::utils::{print_banner, print_error};

use super::prompts::{confirm_step, input_password, input_text, select_many, select_one};

/// Run the full prompt flow. Returns `false` if the user cancelled.
pub fn run_wizard(store: &mut ConfigStore) -> Result<bool> {
    redraw(store)?;

    // Deployment type
    let type_choices: Vec<String> = [
        DeploymentType::Single,
        DeploymentType::Core,
        DeploymentType::Remote,
    ]
    .iter()
    .map(|dt| dt.display_name().to_string())
    .collect();

    let Some(index) = select_one("Select deployment type", &type_choices)? else {
        return Ok(false);
    };
    store.deployment_type = Some(match index {
        0 => DeploymentType::Single,
        1 => DeploymentType::Core,
        _ => DeploymentType::Remote,
    });
    redraw(store)?;

    // Domain
    if !prompt_domain(store)? {
        return Ok(false);
    }
    redraw(store)?;

    // Default credentials
    println!("    {}", style("Default Credentials Configuration").bold());
    println!("    These credentials will be used as defaults for multiple services.");
    println!();

    let user = input_text(
        "Enter default admin username",
        store.get_or("DEFAULT_USER", "admin"),
    )?;
    store.set("DEFAULT_USER", user);
    redraw(store)?;

    let password = input_password(
        "Enter default admin password",
        store.get_or("DEFAULT_PASSWORD", "changeme"),
    )?;
    store.set("DEFAULT_PASSWORD", password);
    redraw(store)?;

    let email = input_text(
        "Enter default admin email",
        store.get_or("DEFAULT_EMAIL", "admin@example.com"),
    )?;
    store.set("DEFAULT_EMAIL", email);
    redraw(store)?;

    // Service selection, branching on deployment type
    let completed = match store.deployment_type {
        Some(DeploymentType::Single) => select_services_single(store)?,
        Some(DeploymentType::Core) => select_services_core(store)?,
        Some(DeploymentType::Remote) | None => select_services_remote(store)?,
    };
    Ok(completed)
}

/// Domain prompt with duckdns format validation; reprompts on invalid input
fn prompt_domain(store: &mut ConfigStore) -> Result<bool> {
    let existing = store.get_or("DOMAIN", "").to_string();
    if !existing.is_empty() {
        println!("    {}", style(format!("Current domain: {}", existing)).cyan());
    }

    loop {
        let domain = if existing.is_empty() {
            super::prompts::input_text_optional("Enter your domain (e.g., yourname.duckdns.org)")?
        } else {
            input_text("Enter your domain (e.g., yourname.duckdns.org)", &existing)?
        };

        if domain.is_empty() {
            print_error("Domain is required");
            return Ok(false);
        }
        if validate_domain(&domain) {
            store.set("DOMAIN", domain);
            return Ok(true);
        }
        print_error("Invalid domain format. Please use format: subdomain.duckdns.org");
    }
}

/// Service selection for single-server deployments
fn select_services_single(store: &mut ConfigStore) -> Result<bool> {
    store.selected = SelectedServices::with_core();
    redraw(store)?;

    // Infrastructure services, all pre-checked
    let infra_items: Vec<String> = INFRASTRUCTURE_SERVICES
        .iter()
        .map(|(name, desc)| format!("{} - {}", name, desc))
        .collect();
    let Some(picked) = select_many(
        "Select infrastructure services",
        &infra_items,
        &vec![true; infra_items.len()],
    )?
    else {
        return Ok(false);
    };
    store.selected.infrastructure = picked
        .into_iter()
        .map(|i| INFRASTRUCTURE_SERVICES[i].0.to_string())
        .collect();
    redraw(store)?;

    // Dashboard services, none pre-checked
    let dash_items: Vec<String> = DASHBOARD_SERVICES
        .iter()
        .map(|(name, desc)| format!("{} - {}", name, desc))
        .collect();
    let Some(picked) = select_many(
        "Select dashboard services (choose one or none)",
        &dash_items,
        &vec![false; dash_items.len()],
    )?
    else {
        return Ok(false);
    };
    store.selected.dashboards = picked
        .into_iter()
        .map(|i| DASHBOARD_SERVICES[i].0.to_string())
        .collect();
    redraw(store)?;

    // Additional service stacks
    let stack_items: Vec<String> = ADDITIONAL_STACKS
        .iter()
        .map(|(stack, desc)| format!("{} - {}", stack.display_name(), desc))
        .collect();
    let Some(picked) = select_many(
        "Select additional service stacks",
        &stack_items,
        &vec![false; stack_items.len()],
    )?
    else {
        return Ok(false);
    };
    store.selected.additional = picked.into_iter().map(|i| ADDITIONAL_STACKS[i].0).collect();
    redraw(store)?;

    Ok(true)
}

/// Service selection for core-only deployments: minimal infrastructure
fn select_services_core(store: &mut ConfigStore) -> Result<bool> {
    store.selected = SelectedServices::with_core();
    redraw(store)?;

    let offered = ["Dockge", "Portainer"];
    let items: Vec<String> = offered
        .iter()
        .map(|name| {
            let desc = INFRASTRUCTURE_SERVICES
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, d)| *d)
                .unwrap_or("");
            format!("{} - {}", name, desc)
        })
        .collect();

    let Some(picked) = select_many("Select infrastructure services", &items, &[true, false])?
    else {
        return Ok(false);
    };
    store.selected.infrastructure = picked.into_iter().map(|i| offered[i].to_string()).collect();
    redraw(store)?;

    Ok(true)
}

/// Remote deployments only configure routing to another server
fn select_services_remote(store: &mut ConfigStore) -> Result<bool> {
    store.selected = SelectedServices::with_core();
    store.selected.remote_config = true;
    redraw(store)?;
    Ok(true)
}

/// Final configuration screen with credentials summary and deploy gate
pub fn show_summary_and_confirm(store: &ConfigStore) -> Result<bool> {
    redraw(store)?;

    println!("    {}", style("Admin Credentials Summary").bold());
    println!("      • Username: {}", store.get_or("DEFAULT_USER", "admin"));
    println!(
        "      • Password: {}",
        store.get_or("DEFAULT_PASSWORD", "changeme")
    );
    println!(
        "      • Email:    {}",
        store.get_or("DEFAULT_EMAIL", "admin@example.com")
    );
    println!();

    confirm_step("Ready to deploy EZ-Homelab with this configuration?", false)
}

/// Clear the screen, re-show the banner, and print the running configuration
fn redraw(store: &ConfigStore) -> Result<()> {
    let term = Term::stdout();
    let _ = term.clear_screen();
    print_banner(env!("CARGO_PKG_VERSION"));
    println!("    {}", style("EZ-Homelab Configuration").blue().bold());
    println!();
    display_current_config(store);
    Ok(())
}

/// Compact checkmarked view of everything configured so far
pub fn display_current_config(store: &ConfigStore) {
    let check = style("✓").green();
    let mut any = false;

    if let Some(dt) = store.deployment_type {
        println!("    {} {}", check, dt.display_name());
        any = true;
    }
    for key in ["DOMAIN", "DEFAULT_USER", "DEFAULT_EMAIL"] {
        if let Some(value) = store.get(key) {
            if !value.is_empty() {
                println!("    {} {}", check, value);
                any = true;
            }
        }
    }
    if !any {
        println!("    Configure your homelab settings...");
    }

    if !store.selected.core.is_empty() {
        println!(
            "    {} Core Services ({})",
            check,
            store.selected.core.join(", ")
        );
    }
    if !store.selected.infrastructure.is_empty() {
        println!(
            "    {} Infrastructure ({})",
            check,
            store.selected.infrastructure.join(", ")
        );
    }
    if !store.selected.dashboards.is_empty() {
        println!(
            "    {} Dashboard ({})",
            check,
            store.selected.dashboards.join(", ")
        );
    }
    for stack in &store.selected.additional {
        println!(
            "    {} {} Services ({})",
            check,
            stack.display_name(),
            stack.description()
        );
    }
    if store.selected.remote_config {
        println!("    {} Remote routing configuration", check);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdditionalStack, CORE_SERVICES};

    #[test]
    fn test_core_services_catalog_matches_selection() {
        let selected = SelectedServices::with_core();
        let names: Vec<&str> = CORE_SERVICES.iter().map(|(n, _)| *n).collect();
        assert_eq!(selected.core, names);
    }

    #[test]
    fn test_additional_stack_catalog_is_complete() {
        assert_eq!(ADDITIONAL_STACKS.len(), AdditionalStack::all().len());
    }
}
