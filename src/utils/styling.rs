//! Terminal styling utilities for a modern, visually appealing CLI

use console::{style, Emoji};
use std::path::Path;

use crate::config::ConfigStore;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static GLOBE: Emoji<'_, '_> = Emoji("🌐 ", "");
pub static USER: Emoji<'_, '_> = Emoji("👤 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗███████╗      ██╗  ██╗ ██████╗ ███╗   ███╗███████╗██╗      █████╗ ██████╗
    ██╔════╝╚══███╔╝      ██║  ██║██╔═══██╗████╗ ████║██╔════╝██║     ██╔══██╗██╔══██╗
    █████╗    ███╔╝ █████╗███████║██║   ██║██╔████╔██║█████╗  ██║     ███████║██████╔╝
    ██╔══╝   ███╔╝  ╚════╝██╔══██║██║   ██║██║╚██╔╝██║██╔══╝  ██║     ██╔══██║██╔══██╗
    ███████╗███████╗      ██║  ██║╚██████╔╝██║ ╚═╝ ██║███████╗███████╗██║  ██║██████╔╝
    ╚══════╝╚══════╝      ╚═╝  ╚═╝ ╚═════╝ ╚═╝     ╚═╝╚══════╝╚══════╝╚═╝  ╚═╝╚═════╝
    "#;

    println!();
    println!("{}", style(banner).blue().bold());
    println!(
        "    {}",
        style("Terminal deployment wizard for self-hosted homelabs").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the configuration card shown before deployment
pub fn print_config(store: &ConfigStore, env_file: &Path, stacks_dir: &Path) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    let deployment = store
        .deployment_type
        .map(|dt| dt.display_name())
        .unwrap_or("Not selected");

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Domain:   {:<37}│",
        GLOBE,
        truncate_string(store.get_or("DOMAIN", "-"), 36)
    );
    println!(
        "    │  {} User:     {:<37}│",
        USER,
        truncate_string(store.get_or("DEFAULT_USER", "admin"), 36)
    );
    println!(
        "    │  {} Settings: {:<37}│",
        SAVE,
        truncate_path(env_file, 36)
    );
    println!(
        "    │  {} Stacks:   {:<37}│",
        FOLDER,
        truncate_path(stacks_dir, 36)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  Deployment type: {:<35}│",
        style(deployment).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!(
        "    {} {}",
        style("⚠").yellow().bold(),
        style(message).yellow()
    );
}

/// Print an error message
pub fn print_error(message: &str) {
    println!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("EZ-Homelab setup completed successfully!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("...{}", tail)
}
