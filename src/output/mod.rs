mod canonical;
mod json;
mod rules;
mod text;

pub use canonical::{DEFAULT_PRECISION, determinize, report_digest};
pub use json::JsonFormatter;
pub use rules::{RulesFormatter, RulesJsonFormatter, RulesTextFormatter};
pub use text::{ColorMode, TextFormatter};

use crate::engine::ComplianceReport;
use crate::error::Result;

/// Trait for rendering a compliance report.
pub trait OutputFormatter {
    /// Format the report into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, report: &ComplianceReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
