//! Service health reporting
//!
//! Shallow process-status polling only: each deployed bundle is asked for its
//! running services via `docker compose ps`. Anything deeper (probes,
//! readiness) is the container runtime's job.

use std::fs;
use std::path::Path;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::deploy::{has_compose_file, ComposeRunner};

/// Poll result for one bundle
#[derive(Debug, Clone)]
pub struct BundleHealth {
    pub bundle: String,
    pub running: bool,
    pub services: Vec<String>,
}

/// Poll every bundle directory under the deployment root that has a compose
/// file, core first then alphabetical.
///
/// A failed `ps` call marks the bundle as not running rather than erroring:
/// health checks never abort the pipeline.
pub fn collect_health(stacks_dir: &Path, runner: &ComposeRunner) -> Vec<BundleHealth> {
    let mut bundles = Vec::new();
    if let Ok(entries) = fs::read_dir(stacks_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if has_compose_file(&path) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    bundles.push(name.to_string());
                }
            }
        }
    }
    bundles.sort();
    if let Some(pos) = bundles.iter().position(|b| b == "core") {
        let core = bundles.remove(pos);
        bundles.insert(0, core);
    }

    let mut statuses = Vec::new();
    for bundle in bundles {
        let bundle_dir = stacks_dir.join(&bundle);
        match runner.ps(&bundle_dir) {
            Ok(services) => statuses.push(BundleHealth {
                bundle,
                running: true,
                services,
            }),
            Err(_) => statuses.push(BundleHealth {
                bundle,
                running: false,
                services: Vec::new(),
            }),
        }
    }
    statuses
}

/// Every polled bundle responded
pub fn all_running(statuses: &[BundleHealth]) -> bool {
    statuses.iter().all(|s| s.running)
}

/// Render the health table
pub fn display_health(statuses: &[BundleHealth]) {
    println!();
    println!(
        "    {} {}",
        style("📊").cyan(),
        style("SERVICE HEALTH STATUS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    if statuses.is_empty() {
        println!("      No deployed bundles found.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Bundle").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Services").add_attribute(Attribute::Bold),
    ]);

    for status in statuses {
        let (label, color) = if status.running {
            ("✓ Running", Color::Green)
        } else {
            ("✗ Issues", Color::Red)
        };
        table.add_row(vec![
            Cell::new(&status.bundle),
            Cell::new(label).fg(color),
            Cell::new(status.services.join(", ")),
        ]);
    }

    // Indent the table to match the rest of the output
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
