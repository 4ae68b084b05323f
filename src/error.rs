use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown framework: {0}")]
    UnknownFramework(String),

    #[error("Unknown rule category: {0}")]
    UnknownCategory(String),

    #[error("Invalid design state: {0}")]
    InvalidState(String),
}

impl ComplianceError {
    /// Short, stable name of the error kind for diagnostics.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::Io(_) => "IO",
            Self::TomlParse(_) => "TOML",
            Self::Json(_) => "JSON",
            Self::UnknownFramework(_) | Self::UnknownCategory(_) => "Lookup",
            Self::InvalidState(_) => "State",
        }
    }
}

pub type Result<T> = std::result::Result<T, ComplianceError>;

/// Failure while evaluating a single rule.
///
/// Never escapes a checker: it is reported as a finding with `error` status.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("expected a numeric value at '{path}', found {found}")]
    NonNumeric { path: String, found: String },

    #[error("no value available at '{path}'")]
    MissingValue { path: String },

    #[error("cannot evaluate formula '{formula}'")]
    UnresolvedFormula { formula: String },

    #[error("rule {rule_id} has no required inputs")]
    NoInputs { rule_id: String },

    #[error("non-finite result for {quantity}")]
    NonFinite { quantity: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
