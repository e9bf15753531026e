//! Spinner helpers for docker compose launches

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a bundle launch is in flight, indented to line up
/// with the pipeline checklist
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("    {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Replace the spinner with a green check and final message
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.set_style(ProgressStyle::with_template("    {msg}").unwrap());
    pb.finish_with_message(format!("{} {}", style("✓").green().bold(), message));
}

/// Replace the spinner with a warning mark and final message
pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.set_style(ProgressStyle::with_template("    {msg}").unwrap());
    pb.finish_with_message(format!("{} {}", style("⚠").yellow().bold(), message));
}
