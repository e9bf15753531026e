//! Configuration module - service catalog and the in-memory settings store

mod stacks;
mod store;

pub use stacks::*;
pub use store::*;
