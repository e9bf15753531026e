//! Interactive prompts using dialoguer
//!
//! Thin wrappers returning `Ok(None)` when the user cancels (Esc/q), so the
//! wizard can abort cleanly instead of erroring.

use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};

/// Single-choice selection; `None` on cancel
pub fn select_one(prompt: &str, items: &[String]) -> Result<Option<usize>> {
    let selection = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()?;
    Ok(selection)
}

/// Multi-choice selection with pre-checked defaults; `None` on cancel
pub fn select_many(
    prompt: &str,
    items: &[String],
    checked: &[bool],
) -> Result<Option<Vec<usize>>> {
    let defaults: Vec<(String, bool)> = items
        .iter()
        .cloned()
        .zip(checked.iter().copied())
        .collect();
    let selection = MultiSelect::new()
        .with_prompt(prompt)
        .items_checked(&defaults)
        .interact_opt()?;
    Ok(selection)
}

/// Text input with a default; blank input keeps the default
pub fn input_text(prompt: &str, default: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(false)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Text input that allows an empty answer
pub fn input_text_optional(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Hidden password input; blank input keeps the default
pub fn input_password(prompt: &str, default: &str) -> Result<String> {
    let value = Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?;
    let value = value.trim().to_string();
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value
    })
}

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
