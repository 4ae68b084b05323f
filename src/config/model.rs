use serde::{Deserialize, Serialize};

use crate::error::{ComplianceError, Result};
use crate::output::DEFAULT_PRECISION;
use crate::rules::Framework;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Project configuration, usually read from `.naval-compliance.toml`.
///
/// Every section is optional; command-line flags override the values here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub vessel: VesselConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Vessel particulars used for rule applicability.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VesselConfig {
    pub name: Option<String>,
    pub vessel_type: Option<String>,
    pub length_m: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Framework values (e.g. `abs_hsnc`), evaluated in this order.
    #[serde(default)]
    pub frameworks: Vec<String>,

    /// Treat `review_required` as a failing outcome.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Decimal places kept when determinizing JSON output.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

const fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl Config {
    /// Reject versions other than [`CONFIG_VERSION`]. A missing version is accepted.
    ///
    /// # Errors
    /// Returns `ComplianceError::Config` for an unsupported version.
    pub fn validate_version(&self) -> Result<()> {
        match &self.version {
            None => Ok(()),
            Some(v) if v == CONFIG_VERSION => Ok(()),
            Some(v) => Err(ComplianceError::Config(format!(
                "Unsupported config version '{v}'. Only version '{CONFIG_VERSION}' is supported."
            ))),
        }
    }

    /// Configured frameworks, parsed.
    ///
    /// # Errors
    /// Returns `ComplianceError::UnknownFramework` for an unrecognized value.
    pub fn frameworks(&self) -> Result<Vec<Framework>> {
        self.evaluation
            .frameworks
            .iter()
            .map(|name| name.parse())
            .collect()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
