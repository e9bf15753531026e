//! CLI module - argument parsing and the interactive prompt flow

mod args;
mod prompts;
mod wizard;

pub use args::Cli;
pub use prompts::*;
pub use wizard::*;
