//! Deployment module - settings file rendering, template copying, and the
//! docker compose launcher

mod compose;
mod env_file;
mod pipeline;
mod templates;

pub use compose::*;
pub use env_file::*;
pub use pipeline::*;
pub use templates::*;
