use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::error::EvaluationError;
use crate::rules::{RuleReference, RuleRequirement};

/// Remediation offered when required inputs are absent.
pub const INCOMPLETE_GUIDANCE: &str =
    "Run the upstream analysis to generate the required data, then re-evaluate";

/// Decimal places used when serializing finding values.
pub const VALUE_PRECISION: i32 = 3;

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    Pass,
    Fail,
    Incomplete,
    Error,
    ReviewRequired,
}

impl FindingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Incomplete => "incomplete",
            Self::Error => "error",
            Self::ReviewRequired => "review_required",
        }
    }
}

/// How serious a finding is, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Pass,
    Advisory,
    Warning,
    NonConformance,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Advisory => "advisory",
            Self::Warning => "warning",
            Self::NonConformance => "non_conformance",
            Self::Critical => "critical",
        }
    }

    /// Severity of a failed rule: mandatory rules are non-conformances.
    #[must_use]
    pub const fn for_failure(mandatory: bool) -> Self {
        if mandatory {
            Self::NonConformance
        } else {
            Self::Warning
        }
    }
}

/// Actual and required values of a numeric comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub actual: f64,
    pub required: f64,
    pub margin: f64,
    pub margin_percent: f64,
}

/// Result of evaluating one rule once.
///
/// Built only through the constructors below, which keep `status` and `severity`
/// consistent: `Pass` status always carries `Pass` severity and nothing else does.
/// Each finding gets a fresh id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub finding_id: Uuid,
    pub rule_id: String,
    pub rule_name: String,
    pub status: FindingStatus,
    pub severity: Severity,
    pub message: String,
    #[serde(serialize_with = "serialize_rounded")]
    pub actual_value: Option<f64>,
    #[serde(serialize_with = "serialize_rounded")]
    pub required_value: Option<f64>,
    #[serde(serialize_with = "serialize_rounded")]
    pub margin: Option<f64>,
    pub margin_percent: Option<f64>,
    pub remediation_guidance: Option<String>,
    pub references: Vec<RuleReference>,
    pub affected_parameters: Vec<String>,
}

impl Finding {
    fn base(
        rule: &RuleRequirement,
        status: FindingStatus,
        severity: Severity,
        message: String,
    ) -> Self {
        Self {
            finding_id: Uuid::new_v4(),
            rule_id: rule.rule_id.clone(),
            rule_name: rule.name.clone(),
            status,
            severity,
            message,
            actual_value: None,
            required_value: None,
            margin: None,
            margin_percent: None,
            remediation_guidance: None,
            references: rule.references.clone(),
            affected_parameters: rule.required_inputs.clone(),
        }
    }

    #[must_use]
    const fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.actual_value = Some(measurement.actual);
        self.required_value = Some(measurement.required);
        self.margin = Some(measurement.margin);
        self.margin_percent = Some(measurement.margin_percent);
        self
    }

    /// Requirement met.
    #[must_use]
    pub fn pass(rule: &RuleRequirement, measurement: Measurement, message: String) -> Self {
        Self::base(rule, FindingStatus::Pass, Severity::Pass, message)
            .with_measurement(measurement)
    }

    /// Requirement not met; severity follows `rule.mandatory`.
    #[must_use]
    pub fn fail(
        rule: &RuleRequirement,
        measurement: Measurement,
        message: String,
        remediation: impl Into<String>,
    ) -> Self {
        Self::fail_with_severity(
            rule,
            Severity::for_failure(rule.mandatory),
            measurement,
            message,
            remediation,
        )
    }

    /// Requirement not met with an explicit severity, for checkers that grade failures
    /// (e.g. `Critical`). A `Pass` severity is raised to `Advisory`.
    #[must_use]
    pub fn fail_with_severity(
        rule: &RuleRequirement,
        severity: Severity,
        measurement: Measurement,
        message: String,
        remediation: impl Into<String>,
    ) -> Self {
        let severity = severity.max(Severity::Advisory);
        let mut finding = Self::base(rule, FindingStatus::Fail, severity, message)
            .with_measurement(measurement);
        finding.remediation_guidance = Some(remediation.into());
        finding
    }

    /// One or more required inputs are absent from the design state.
    #[must_use]
    pub fn incomplete(rule: &RuleRequirement, missing: &[String]) -> Self {
        let message = format!(
            "{}: missing required inputs: {}",
            rule.name,
            missing.join(", ")
        );
        let mut finding = Self::base(rule, FindingStatus::Incomplete, Severity::Warning, message);
        finding.remediation_guidance = Some(INCOMPLETE_GUIDANCE.to_string());
        finding
    }

    /// Evaluation itself failed. Never escalated beyond `Warning`.
    #[must_use]
    pub fn error(rule: &RuleRequirement, error: &EvaluationError) -> Self {
        let message = format!("{}: evaluation error: {error}", rule.name);
        Self::base(rule, FindingStatus::Error, Severity::Warning, message)
    }

    /// Deferred to a human reviewer.
    #[must_use]
    pub fn review_required(rule: &RuleRequirement, message: String) -> Self {
        Self::base(
            rule,
            FindingStatus::ReviewRequired,
            Severity::Advisory,
            message,
        )
    }

    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self.status, FindingStatus::Pass)
    }

    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self.status, FindingStatus::Fail)
    }

    /// A failure that blocks compliance (non-conformance or critical).
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.is_fail() && self.severity >= Severity::NonConformance
    }
}

/// Round to `VALUE_PRECISION` decimals at serialization time.
#[allow(clippy::ref_option)] // serde's serialize_with passes &Option<T>
fn serialize_rounded<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&round_to(*v, VALUE_PRECISION)),
        None => serializer.serialize_none(),
    }
}

/// Round `value` to `places` decimal digits. Non-finite values pass through.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
