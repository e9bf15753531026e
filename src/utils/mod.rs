//! Shared terminal utilities - styling and progress helpers

mod progress;
mod styling;
mod system;

pub use progress::*;
pub use styling::*;
pub use system::*;
