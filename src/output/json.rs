use serde_json::Value;

use crate::engine::ComplianceReport;
use crate::error::Result;

use super::OutputFormatter;
use super::canonical::{DEFAULT_PRECISION, determinize, report_digest};

/// Pretty-printed, determinized JSON with the report digest attached.
pub struct JsonFormatter {
    precision: u32,
}

impl JsonFormatter {
    #[must_use]
    pub const fn new(precision: u32) -> Self {
        Self { precision }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ComplianceReport) -> Result<String> {
        let mut value = report.to_value()?;
        if let Value::Object(map) = &mut value {
            map.insert(
                "digest".to_string(),
                Value::String(report_digest(report, self.precision)?),
            );
        }
        Ok(serde_json::to_string_pretty(&determinize(
            &value,
            self.precision,
        ))?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
