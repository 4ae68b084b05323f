use crate::error::EvaluationError;
use crate::rules::{LimitType, RuleRequirement};
use crate::state::DesignState;

use super::Checker;
use super::inputs::evaluate_with_inputs;
use super::result::Finding;
use super::threshold::{check_limit, comparison_message};

pub const FREEBOARD_PATH: &str = "hull.freeboard";
pub const LWL_PATH: &str = "hull.lwl";

/// Absolute floor on freeboard, metres.
pub const MIN_FREEBOARD_M: f64 = 0.3;
/// Freeboard required per metre of waterline length.
pub const FREEBOARD_PER_LWL: f64 = 0.01;

const FREEBOARD_REMEDIATION: &str =
    "Increase depth or reduce draft (lighten the vessel) to raise freeboard";

/// Required freeboard for a waterline length: `max(0.3, 0.01 * lwl)`, or 0.3 when
/// the length is not positive.
#[must_use]
pub fn minimum_freeboard(lwl: f64) -> f64 {
    if lwl > 0.0 {
        MIN_FREEBOARD_M.max(lwl * FREEBOARD_PER_LWL)
    } else {
        MIN_FREEBOARD_M
    }
}

/// Minimum freeboard rules, evaluated from `hull.freeboard` and `hull.lwl`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeboardRuleChecker;

impl Checker for FreeboardRuleChecker {
    fn name(&self) -> &'static str {
        "freeboard"
    }

    fn check(&self, rule: &RuleRequirement, state: &dyn DesignState) -> Finding {
        evaluate_with_inputs(rule, state, |inputs| {
            let freeboard = inputs.number(FREEBOARD_PATH)?;
            let lwl = inputs.number(LWL_PATH)?;
            if !freeboard.is_finite() || !lwl.is_finite() {
                return Err(EvaluationError::NonFinite {
                    quantity: rule.name.clone(),
                });
            }
            let required = minimum_freeboard(lwl);

            let check = check_limit(freeboard, required, LimitType::Minimum);
            let message = comparison_message(&rule.name, &check.measurement, check.passed);
            if check.passed {
                Ok(Finding::pass(rule, check.measurement, message))
            } else {
                Ok(Finding::fail(
                    rule,
                    check.measurement,
                    message,
                    FREEBOARD_REMEDIATION,
                ))
            }
        })
    }
}

#[cfg(test)]
#[path = "freeboard_tests.rs"]
mod tests;
