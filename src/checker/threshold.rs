use crate::rules::LimitType;

use super::result::Measurement;

/// Tolerance for `LimitType::Exact` comparisons.
pub const EXACT_TOLERANCE: f64 = 0.001;

/// Whether `actual` satisfies `required` under `limit_type`.
#[must_use]
pub fn satisfies(actual: f64, required: f64, limit_type: LimitType) -> bool {
    match limit_type {
        LimitType::Minimum => actual >= required,
        LimitType::Maximum => actual <= required,
        LimitType::Exact => (actual - required).abs() < EXACT_TOLERANCE,
    }
}

/// Margin of `actual` over `required`, absolute and as a percentage of `|required|`.
///
/// A zero requirement gives 0% when the actual value is also zero and +inf otherwise.
#[must_use]
#[allow(clippy::float_cmp)] // exact zero is the only special case
pub fn measure(actual: f64, required: f64) -> Measurement {
    let margin = actual - required;
    let margin_percent = if required == 0.0 {
        if actual == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        margin / required.abs() * 100.0
    };
    Measurement {
        actual,
        required,
        margin,
        margin_percent,
    }
}

/// Comparison outcome together with its measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitCheck {
    pub passed: bool,
    pub measurement: Measurement,
}

#[must_use]
pub fn check_limit(actual: f64, required: f64, limit_type: LimitType) -> LimitCheck {
    LimitCheck {
        passed: satisfies(actual, required, limit_type),
        measurement: measure(actual, required),
    }
}

/// `"{name}: {actual} meets requirement of {required}"` with three decimals,
/// or `does not meet` for a failure.
#[must_use]
pub fn comparison_message(name: &str, measurement: &Measurement, passed: bool) -> String {
    let verdict = if passed { "meets" } else { "does not meet" };
    format!(
        "{name}: {:.3} {verdict} requirement of {:.3}",
        measurement.actual, measurement.required
    )
}

#[cfg(test)]
#[path = "threshold_tests.rs"]
mod tests;
