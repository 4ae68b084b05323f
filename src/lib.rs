pub mod checker;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod state;

pub use error::{ComplianceError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NON_COMPLIANT: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
