//! Reporting module - service health polling and display

mod health;

pub use health::*;
