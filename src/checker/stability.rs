use crate::error::EvaluationError;
use crate::rules::RuleRequirement;
use crate::state::DesignState;

use super::Checker;
use super::formula::evaluate_formula;
use super::inputs::evaluate_with_inputs;
use super::result::Finding;
use super::threshold::{check_limit, comparison_message};

/// Intact stability criteria: GM, GZ curve areas, maximum GZ and its angle, range.
///
/// The actual value is the rule's first required input. The required value is the
/// rule's formula when present, otherwise its `limit_value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityRuleChecker;

impl Checker for StabilityRuleChecker {
    fn name(&self) -> &'static str {
        "stability"
    }

    fn check(&self, rule: &RuleRequirement, state: &dyn DesignState) -> Finding {
        evaluate_with_inputs(rule, state, |inputs| {
            if rule.is_manual_review() {
                return Ok(Finding::review_required(
                    rule,
                    format!("{}: no numeric limit defined, manual review required", rule.name),
                ));
            }

            let actual = inputs.primary(rule)?;
            let required = required_value(rule, state)?;
            if !actual.is_finite() || !required.is_finite() {
                return Err(EvaluationError::NonFinite {
                    quantity: rule.name.clone(),
                });
            }

            let check = check_limit(actual, required, rule.limit_type);
            let message = comparison_message(&rule.name, &check.measurement, check.passed);
            if check.passed {
                Ok(Finding::pass(rule, check.measurement, message))
            } else {
                Ok(Finding::fail(
                    rule,
                    check.measurement,
                    message,
                    remediation_for(&rule.name),
                ))
            }
        })
    }
}

fn required_value(rule: &RuleRequirement, state: &dyn DesignState) -> Result<f64, EvaluationError> {
    match (&rule.formula, rule.limit_value) {
        (Some(formula), _) => {
            evaluate_formula(formula, state).ok_or_else(|| EvaluationError::UnresolvedFormula {
                formula: formula.clone(),
            })
        }
        (None, Some(limit)) => Ok(limit),
        (None, None) => Err(EvaluationError::MissingValue {
            path: format!("{}.limit_value", rule.rule_id),
        }),
    }
}

/// Guidance chosen from the quantity named in the rule.
#[must_use]
pub fn remediation_for(rule_name: &str) -> &'static str {
    if rule_name.contains("GM") {
        "Lower the vertical centre of gravity (VCG) or increase beam to raise GM"
    } else if rule_name.contains("Area") {
        "Improve the GZ curve: raise freeboard, add reserve buoyancy or lower VCG to increase area"
    } else if rule_name.contains("GZ") && !rule_name.contains("Angle") {
        "Increase the righting arm by lowering VCG or increasing beam and freeboard"
    } else if rule_name.contains("Angle") {
        "Modify the hull form (flare, freeboard, deck edge immersion) to shift maximum GZ to a larger angle"
    } else if rule_name.contains("Range") {
        "Add reserve buoyancy above the waterline (superstructure, freeboard) to extend the range"
    } else {
        "Review the design against the stability criterion and adjust loading or hull form"
    }
}

#[cfg(test)]
#[path = "stability_tests.rs"]
mod tests;
